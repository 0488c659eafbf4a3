fn main() {
    // ESP-IDF toolchain environment; host-only builds skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
