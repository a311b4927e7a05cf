use std::process::Command;

use crate::error::{Error, ToolFailure};

/// Run an external tool to completion, capturing both output streams.
///
/// `Command::output` spawns and reaps in one call, so the child is waited
/// on no matter how this function returns. The captured text is stdout
/// followed by stderr; line order within each stream is preserved.
pub fn run_tool(mut command: Command) -> Result<String, Error> {
    let rendered = render(&command);
    log::debug!("running {:?}", rendered);

    let output = command.output().map_err(|source| Error::Spawn {
        tool: command.get_program().into(),
        source,
    })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }

    if !output.status.success() {
        return Err(Error::Tool(ToolFailure {
            command: rendered,
            status: output.status,
            output: text,
        }));
    }

    Ok(text)
}

fn render(command: &Command) -> Vec<String> {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn render_keeps_argument_order() {
    let mut command = Command::new("moc");
    command.arg("--collect-json").arg("-o").arg("out.json");

    assert_eq!(render(&command), vec!["moc", "--collect-json", "-o", "out.json"]);
}
