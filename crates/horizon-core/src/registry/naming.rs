//! Master supervisor naming convention.
//!
//! A master registers as `<basename>-<suffix>` where the basename is the
//! slugged host name, so every master started on this host shares a prefix.

/// Slug a host name the way the supervisors name themselves.
///
/// `_` and whitespace act as separators, `@` spells `-at-`, any other
/// punctuation is dropped without a separator (`a.b` becomes `ab`). Runs of
/// separators collapse to one `-`, trimmed at both ends. Only ASCII letters
/// and digits survive; non-ASCII characters are dropped, not transliterated.
pub fn master_basename(hostname: &str) -> String {
    let mut out = String::with_capacity(hostname.len());
    let mut pending_dash = false;

    for c in hostname.chars() {
        match c {
            c if c.is_ascii_alphanumeric() => {
                push_segment(&mut out, &mut pending_dash);
                out.push(c.to_ascii_lowercase());
            }
            '@' => {
                pending_dash = true;
                push_segment(&mut out, &mut pending_dash);
                out.push_str("at");
                pending_dash = true;
            }
            '-' | '_' => pending_dash = true,
            c if c.is_whitespace() => pending_dash = true,
            _ => {}
        }
    }

    out
}

fn push_segment(out: &mut String, pending_dash: &mut bool) {
    if *pending_dash && !out.is_empty() {
        out.push('-');
    }
    *pending_dash = false;
}

/// Prefix shared by the master supervisors of this host.
pub fn local_master_prefix() -> String {
    master_basename(&host_name())
}

#[cfg(feature = "host-discovery")]
fn host_name() -> String {
    sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string())
}

#[cfg(not(feature = "host-discovery"))]
fn host_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string())
}
