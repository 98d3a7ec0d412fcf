//! OCIO v2 YAML writer.
//!
//! The layout follows what OpenColorIO itself serializes: block mappings at
//! the top level, one `!<ColorSpace>` block per color space, and flow
//! mappings for leaf transforms. Group transforms nest as blocks.

use std::fmt::Write;

use crate::colorspace::ColorSpace;
use crate::config::Config;
use crate::error::{OcioError, OcioResult};
use crate::transform::{Transform, TransformDirection};

const INDENT: &str = "  ";

/// Serializes `config`.
pub(crate) fn write_config(config: &Config) -> OcioResult<String> {
    let mut out = String::new();

    writeln!(out, "ocio_profile_version: 2")?;
    writeln!(out)?;
    writeln!(out, "environment:\n  {{}}")?;
    if !config.search_paths().is_empty() {
        writeln!(out, "search_path: {}", scalar(&config.search_paths().join(":")))?;
    }
    writeln!(out, "strictparsing: {}", config.strict_parsing())?;
    writeln!(out, "luma: {}", number_list(&config.luma()))?;
    if !config.name().is_empty() {
        writeln!(out, "name: {}", scalar(config.name()))?;
    }
    if !config.description().is_empty() {
        writeln!(out, "description: {}", scalar(config.description()))?;
    }

    writeln!(out)?;
    writeln!(out, "roles:")?;
    for (role, cs) in config.roles().iter() {
        writeln!(out, "{INDENT}{}: {}", scalar(role), scalar(cs))?;
    }

    writeln!(out)?;
    writeln!(out, "file_rules:")?;
    for rule in config.file_rules() {
        write!(out, "{INDENT}- !<Rule> {{name: {}", scalar(&rule.name))?;
        if let Some(pattern) = &rule.pattern {
            write!(out, ", pattern: {}", scalar(pattern))?;
        }
        if let Some(extension) = &rule.extension {
            write!(out, ", extension: {}", scalar(extension))?;
        }
        writeln!(out, ", colorspace: {}}}", scalar(&rule.colorspace))?;
    }

    writeln!(out)?;
    writeln!(out, "displays:")?;
    for display in config.displays() {
        writeln!(out, "{INDENT}{}:", scalar(display.name()))?;
        for view in display.views() {
            writeln!(
                out,
                "{INDENT}{INDENT}- !<View> {{name: {}, colorspace: {}}}",
                scalar(view.name()),
                scalar(view.colorspace())
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "active_displays: {}", string_list(config.active_displays()))?;
    writeln!(out, "active_views: {}", string_list(config.active_views()))?;

    writeln!(out)?;
    writeln!(out, "colorspaces:")?;
    for (i, cs) in config.colorspaces().iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_colorspace(&mut out, cs)?;
    }

    Ok(out)
}

fn write_colorspace(out: &mut String, cs: &ColorSpace) -> OcioResult<()> {
    let pad = INDENT.repeat(2);
    writeln!(out, "{INDENT}- !<ColorSpace>")?;
    writeln!(out, "{pad}name: {}", scalar(cs.name()))?;
    if !cs.aliases().is_empty() {
        writeln!(out, "{pad}aliases: {}", string_list(cs.aliases()))?;
    }
    writeln!(out, "{pad}family: {}", scalar(cs.family()))?;
    writeln!(out, "{pad}equalitygroup: \"\"")?;
    writeln!(out, "{pad}bitdepth: unknown")?;
    writeln!(out, "{pad}description: {}", scalar(cs.description()))?;
    writeln!(out, "{pad}isdata: {}", cs.is_data())?;
    if !cs.encoding().as_str().is_empty() {
        writeln!(out, "{pad}encoding: {}", cs.encoding().as_str())?;
    }
    writeln!(out, "{pad}allocation: uniform")?;

    let key = cs.reference().key();
    if let Some(t) = cs.to_reference() {
        write!(out, "{pad}to_{key}: ")?;
        write_transform(out, t, 2)?;
    }
    if let Some(t) = cs.from_reference() {
        write!(out, "{pad}from_{key}: ")?;
        write_transform(out, t, 2)?;
    }
    Ok(())
}

/// Writes `t` after a key or list dash, ending with a newline.
///
/// `depth` is the indentation level of the line the transform starts on.
fn write_transform(out: &mut String, t: &Transform, depth: usize) -> OcioResult<()> {
    let Transform::Group(group) = t else {
        writeln!(out, "{}", flow_transform(t)?)?;
        return Ok(());
    };

    let pad = INDENT.repeat(depth + 1);
    writeln!(out, "!<GroupTransform>")?;
    if group.direction == TransformDirection::Inverse {
        writeln!(out, "{pad}direction: inverse")?;
    }
    if group.children.is_empty() {
        writeln!(out, "{pad}children: []")?;
        return Ok(());
    }
    writeln!(out, "{pad}children:")?;
    for child in &group.children {
        write!(out, "{pad}{INDENT}- ")?;
        write_transform(out, child, depth + 2)?;
    }
    Ok(())
}

/// Single-line form of a leaf transform.
fn flow_transform(t: &Transform) -> OcioResult<String> {
    let mut fields: Vec<String> = Vec::new();
    match t {
        Transform::Matrix(m) => {
            fields.push(format!("matrix: {}", number_list(&m.matrix)));
            if m.offset.iter().any(|&v| v != 0.0) {
                fields.push(format!("offset: {}", number_list(&m.offset)));
            }
        }
        Transform::Range(r) => {
            let bounds = [
                ("min_in_value", r.min_in),
                ("max_in_value", r.max_in),
                ("min_out_value", r.min_out),
                ("max_out_value", r.max_out),
            ];
            for (key, value) in bounds {
                if let Some(v) = value {
                    fields.push(format!("{key}: {}", number(v)));
                }
            }
        }
        Transform::Allocation(a) => {
            fields.push(format!("allocation: {}", a.allocation.as_str()));
            if !a.vars.is_empty() {
                fields.push(format!("vars: {}", number_list(&a.vars)));
            }
        }
        Transform::Exponent(e) => {
            fields.push(format!("value: {}", number_list(&e.value)));
            if e.negative_style != Default::default() {
                fields.push(format!("style: {}", e.negative_style.as_str()));
            }
        }
        Transform::ColorSpace(c) => {
            fields.push(format!("src: {}", scalar(&c.src)));
            fields.push(format!("dst: {}", scalar(&c.dst)));
        }
        Transform::File(f) => {
            fields.push(format!("src: {}", scalar(&f.src)));
            if f.interpolation != Default::default() {
                fields.push(format!("interpolation: {}", f.interpolation.as_str()));
            }
        }
        Transform::Group(_) => {
            return Err(OcioError::InvalidTransform {
                reason: "group transforms have no flow form".into(),
            });
        }
    }
    if t.direction() == TransformDirection::Inverse {
        fields.push(format!("direction: {}", t.direction().as_str()));
    }
    Ok(format!("!<{}> {{{}}}", t.tag(), fields.join(", ")))
}

/// Shortest representation that parses back to the same `f64`.
fn number(v: f64) -> String {
    if v == 0.0 {
        // drops the sign of -0.0
        "0".into()
    } else if v.is_nan() {
        ".nan".into()
    } else if v.is_infinite() {
        if v > 0.0 { ".inf".into() } else { "-.inf".into() }
    } else {
        format!("{v}")
    }
}

fn number_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|&v| number(v)).collect();
    format!("[{}]", items.join(", "))
}

fn string_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| scalar(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Quotes `s` if a plain scalar would change meaning, in block or flow context.
fn scalar(s: &str) -> String {
    const SPECIAL: &[char] = &[
        ':', '#', ',', '[', ']', '{', '}', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
    ];
    const RESERVED: &[&str] = &[
        "true", "false", "yes", "no", "on", "off", "null", "~", "y", "n",
    ];

    let needs_quotes = s.is_empty()
        || s.starts_with(['-', '?', ' '])
        || s.ends_with(' ')
        || s.contains(SPECIAL)
        || s.contains(char::is_control)
        || RESERVED.iter().any(|r| r.eq_ignore_ascii_case(s))
        || s.parse::<f64>().is_ok();

    if !needs_quotes {
        return s.to_string();
    }
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
