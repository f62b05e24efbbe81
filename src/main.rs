fn main() {
    scanfleet::app::cli::run();
}
