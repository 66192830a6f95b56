//! runit CLI entry point

fn main() {
    runit::cli::run();
}
