//! Load a user.js file and print its settings
//!
//! Pass a path to load that file, or run without arguments to print the
//! bundled list:
//!
//! ```text
//! cargo run --example load_sample -- ~/.mozilla/firefox/abcd.default/user.js
//! ```

use std::env;
use std::path::Path;
use userjs::{load_file, sample, ParseOptions, PrefKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let settings = if args.len() > 1 {
        let path = Path::new(&args[1]);
        println!("Reading settings from: {}", path.display());
        load_file(path, &ParseOptions::default())?
    } else {
        println!("Reading the bundled user.js");
        sample()
    };

    println!("\nFound {} settings\n", settings.len());
    println!("{:-<80}", "");
    println!("{:<50} {:<8} {:<20}", "Preference", "Kind", "Value");
    println!("{:-<80}", "");

    for setting in &settings {
        let kind = match setting.kind {
            PrefKind::User => "user",
            PrefKind::Default => "default",
            PrefKind::Locked => "locked",
            PrefKind::Sticky => "sticky",
        };
        println!("{:<50} {:<8} {:<20}", setting.key, kind, setting.value.to_string());
    }

    Ok(())
}
