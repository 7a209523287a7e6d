//! lapchart main entrypoint.

use lapchart::run;
use lapchart::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        match e.code() {
            "other" => error(format!("Error: {}", e)),
            code => error(format!("Error [{}]: {}", code, e)),
        }
        std::process::exit(1);
    }
}
