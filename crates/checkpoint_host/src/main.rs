fn main() -> Result<(), Box<dyn std::error::Error>> {
    lib_checkpoint_host::init()
}
