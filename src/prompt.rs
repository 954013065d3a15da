use calman_core::page::Confirm;
use owo_colors::OwoColorize;

/// Yes/no prompt on the terminal. Defaults to "no".
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        match dialoguer::Confirm::new()
            .with_prompt(format!("  {}", message))
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
                false
            }
        }
    }
}
