//! Print the directory tree of an ISO 9660 disc image.
//!
//! Usage: list_iso <image.iso | image.bin>

use std::path::Path;
use std::process::ExitCode;

use iso_browse::browse::VolumeBrowser;
use iso_browse::DiscImage;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: list_iso <image.iso | image.bin>");
        return ExitCode::FAILURE;
    };

    match list(Path::new(&path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn list(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let image = DiscImage::open(path)?;
    let mut browser = VolumeBrowser::new(image)?;

    println!(
        "Volume: {}",
        browser.volume_name().unwrap_or("(unnamed)")
    );

    for directory in browser.directories()? {
        let shown = if directory.path.is_empty() {
            "/"
        } else {
            directory.path.as_str()
        };
        println!("{}", shown);

        for entry in browser.list_directory(&directory)? {
            if entry.is_directory() {
                println!("  {}/", entry.name);
            } else {
                println!("  {} ({} bytes)", entry.name, entry.size);
            }
        }
    }

    Ok(())
}
