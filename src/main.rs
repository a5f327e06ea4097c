fn main() {
    obfuscator::cli::run();
}
