use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("pagedown")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Pagedown Contributors")
        .about("Render a web page and print its main content as Markdown")
        .arg(clap::arg!(<URL> "URL of the page to convert"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "pagedown", &completions_dir).unwrap();
    }

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
