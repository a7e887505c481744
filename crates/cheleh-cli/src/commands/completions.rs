use clap_complete::Shell;

/// Print a completion script for `shell` to stdout.
pub fn run(shell: Shell, mut cmd: clap::Command) -> Result<(), Box<dyn std::error::Error>> {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
