//! Route listing: every page binding, without rendering.

use std::io::{self, Write};

use anyhow::Result;

use crate::cli::RoutesArgs;
use crate::config::SiteConfig;
use crate::page::PageBinding;

/// Print the bindings of `config`, in registration order.
pub fn list_routes(config: &SiteConfig, args: &RoutesArgs) -> Result<()> {
    let bindings = super::common::collect_bindings(config)?;
    let bindings = filter_language(bindings, args.lang.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_routes(&mut out, &bindings, args)?;
    out.flush()?;
    Ok(())
}

/// Keep bindings of `language`; the entry page is always kept.
fn filter_language(bindings: Vec<PageBinding>, language: Option<&str>) -> Vec<PageBinding> {
    let Some(language) = language else {
        return bindings;
    };
    bindings
        .into_iter()
        .filter(|b| b.is_entry() || b.language.as_deref() == Some(language))
        .collect()
}

fn write_routes(out: &mut impl Write, bindings: &[PageBinding], args: &RoutesArgs) -> Result<()> {
    if args.plain {
        let width = bindings.iter().map(|b| b.url.len()).max().unwrap_or(0);
        for binding in bindings {
            let language = binding.language.as_deref().unwrap_or("-");
            writeln!(out, "{:width$}  {}  {}", binding.url, binding.template, language)?;
        }
        return Ok(());
    }

    let formatted = if args.pretty {
        serde_json::to_string_pretty(bindings)?
    } else {
        serde_json::to_string(bindings)?
    };
    writeln!(out, "{}", formatted)?;
    Ok(())
}
