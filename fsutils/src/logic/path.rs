use std::env;
use std::path::{Component, Path, PathBuf};

use log::trace;

use crate::error::FsError;

pub fn expand_path(raw: &str) -> Result<PathBuf, FsError> {
    let expanded = expand_home(&expand_env(raw))?;
    let cleaned = clean(&expanded);
    trace!("expanded {:?} to {:?}", raw, cleaned);
    Ok(cleaned)
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

pub fn expand_env(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed {
                    result.push_str(&env::var(&name).unwrap_or_default());
                } else {
                    result.push_str("${");
                    result.push_str(&name);
                }
            }
            Some(&c) if is_name_char(c) => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if !is_name_char(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                result.push_str(&env::var(&name).unwrap_or_default());
            }
            _ => result.push('$'),
        }
    }
    result
}

fn expand_home(path: &str) -> Result<String, FsError> {
    if path == "~" || path.starts_with("~/") {
        let home = dirs::home_dir().ok_or(FsError::HomeDirectory)?;
        return Ok(format!("{}{}", home.display(), &path[1..]));
    }
    Ok(path.to_string())
}

pub fn clean(path: &str) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.iter().collect()
    }
}
