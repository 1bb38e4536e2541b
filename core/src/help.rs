//! Option listing for help output.

use crate::{OptionDescriptor, OptionSchema};

/// Column at which option descriptions start.
pub const DESCRIPTION_COLUMN: usize = 40;

impl OptionSchema {
    /// Formats the public options as a two-column listing.
    ///
    /// Value-taking options show `arg`, defaults show as `(=value)` and
    /// implicit values as `[=arg(=value)]`. A flag column too wide for the
    /// description column puts the description on the next line.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbshell_options_core::{OptionDescriptor, OptionSchema};
    ///
    /// let mut schema = OptionSchema::new("options");
    /// schema.add_option(OptionDescriptor::switch("quiet", "be less chatty")).unwrap();
    /// schema.add_option(OptionDescriptor::switch("nokillop", "").hidden()).unwrap();
    ///
    /// let listing = schema.help_listing();
    /// assert!(listing.starts_with("options:\n  --quiet "));
    /// assert!(listing.contains("be less chatty"));
    /// assert!(!listing.contains("nokillop"));
    /// ```
    pub fn help_listing(&self) -> String {
        let mut out = format!("{}:\n", self.title);

        for option in self.visible_options() {
            let flag = format!("  {}", flag_column(option));
            if option.description.is_empty() {
                out.push_str(&flag);
            } else if flag.len() < DESCRIPTION_COLUMN {
                out.push_str(&format!(
                    "{flag:<width$}{}",
                    option.description,
                    width = DESCRIPTION_COLUMN
                ));
            } else {
                out.push_str(&flag);
                out.push('\n');
                out.push_str(&" ".repeat(DESCRIPTION_COLUMN));
                out.push_str(&option.description);
            }
            out.push('\n');
        }

        out
    }
}

fn flag_column(option: &OptionDescriptor) -> String {
    let mut column = option.spelling();
    if !option.kind.takes_value() {
        return column;
    }

    match &option.implicit_value {
        Some(implicit) => column.push_str(&format!(" [=arg(={implicit})]")),
        None => column.push_str(" arg"),
    }
    if let Some(default) = &option.default_value {
        column.push_str(&format!(" (={default})"));
    }
    column
}
