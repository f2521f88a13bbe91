fn main() {
    // Only the firmware build needs the ESP-IDF environment exported;
    // host builds (tests, fuzzing) skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
