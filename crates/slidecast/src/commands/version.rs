use colored::Colorize;

pub fn run() {
    println!("{} {}", "slidecast".bold(), env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!("{}", env!("CARGO_PKG_REPOSITORY"));
}
