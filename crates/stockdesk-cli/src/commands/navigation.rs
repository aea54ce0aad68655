use stockdesk_ui::{HORIZONTAL, VERTICAL, title_for};

use crate::cli::{MenuLayout, NavArgs, OutputFormat};
use crate::client::{CliError, CliResult};
use crate::output::render_menu;

pub(crate) fn handle_nav(args: &NavArgs, output: OutputFormat) -> CliResult<()> {
    if let Some(route) = &args.route {
        let title = title_for(route)
            .ok_or_else(|| CliError::validation(format!("no menu entry for '{route}'")))?;
        println!("{title}");
        return Ok(());
    }
    let menu = match args.layout {
        MenuLayout::Horizontal => HORIZONTAL,
        MenuLayout::Vertical => VERTICAL,
    };
    render_menu(menu, output)
}
