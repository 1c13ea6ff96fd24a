fn main() {
  if let Err(e) = cycle_log_lib::run() {
    eprintln!("cycle-log: {}", e);
    std::process::exit(1);
  }
}
