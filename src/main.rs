use std::env;

use anyhow::Context;

use rilo::editor::Editor;
use rilo::logger;

fn main() -> anyhow::Result<()> {
    let _ = logger::init(".rilo.log");

    let mut editor = Editor::new().context("failed to set up terminal")?;
    if let Some(path) = env::args().nth(1) {
        editor.open(&path)?;
    }
    editor.run()?;
    Ok(())
}
