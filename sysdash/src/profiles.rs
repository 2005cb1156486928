//! Connection profiles: load/save simple JSON mapping of profile name -> { url, interval_ms }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/sysdash/profiles.json (fallback ~/.config/sysdash/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("sysdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sysdash")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn default_log_path() -> PathBuf {
    config_dir().join("sysdash.log")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable {}: {e}", path.display());
            ProfilesFile::default()
        }),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(io::Error::other)?;
    fs::write(path, data)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveProfile {
    /// Use the provided runtime inputs (not persisted yet).
    Direct(ProfileEntry),
    /// Loaded from an existing profile entry.
    Loaded(ProfileEntry),
    /// Should prompt user to select among profile names
    PromptSelect(Vec<String>),
    /// Should prompt user to create a new profile (name)
    PromptCreate(String),
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub interval_ms: Option<u64>,
}

impl ProfileRequest {
    /// `default_url` is used when nothing was given and no profiles exist.
    pub fn resolve(self, pf: &ProfilesFile, default_url: &str) -> ResolveProfile {
        match (self.profile_name, self.url) {
            // Profile only -> load, or offer to create it
            (Some(name), None) => match pf.profiles.get(&name) {
                Some(entry) => {
                    let mut entry = entry.clone();
                    if self.interval_ms.is_some() {
                        entry.interval_ms = self.interval_ms;
                    }
                    ResolveProfile::Loaded(entry)
                }
                None => ResolveProfile::PromptCreate(name),
            },
            // URL given (with or without a profile) -> direct, caller may persist
            (_, Some(url)) => ResolveProfile::Direct(ProfileEntry {
                url,
                interval_ms: self.interval_ms,
            }),
            (None, None) if !pf.profiles.is_empty() => {
                ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect())
            }
            (None, None) => ResolveProfile::Direct(ProfileEntry {
                url: default_url.to_string(),
                interval_ms: self.interval_ms,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(name: &str, url: &str) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert(
            name.into(),
            ProfileEntry {
                url: url.into(),
                interval_ms: Some(5000),
            },
        );
        pf
    }

    fn req(profile: Option<&str>, url: Option<&str>, interval_ms: Option<u64>) -> ProfileRequest {
        ProfileRequest {
            profile_name: profile.map(Into::into),
            url: url.map(Into::into),
            interval_ms,
        }
    }

    #[test]
    fn profile_only_loads_existing_entry() {
        let pf = file_with("lab", "http://lab:5000/api/system");
        match req(Some("lab"), None, None).resolve(&pf, "http://d") {
            ResolveProfile::Loaded(e) => {
                assert_eq!(e.url, "http://lab:5000/api/system");
                assert_eq!(e.interval_ms, Some(5000));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cli_interval_overrides_profile() {
        let pf = file_with("lab", "http://lab");
        let r = req(Some("lab"), None, Some(750)).resolve(&pf, "http://d");
        assert!(matches!(r, ResolveProfile::Loaded(ProfileEntry { interval_ms: Some(750), .. })));
    }

    #[test]
    fn unknown_profile_prompts_create() {
        let pf = ProfilesFile::default();
        assert_eq!(
            req(Some("new"), None, None).resolve(&pf, "http://d"),
            ResolveProfile::PromptCreate("new".into())
        );
    }

    #[test]
    fn nothing_given_selects_or_falls_back_to_default() {
        let pf = file_with("a", "http://a");
        assert_eq!(
            req(None, None, None).resolve(&pf, "http://d"),
            ResolveProfile::PromptSelect(vec!["a".into()])
        );
        assert_eq!(
            req(None, None, None).resolve(&ProfilesFile::default(), "http://d"),
            ResolveProfile::Direct(ProfileEntry {
                url: "http://d".into(),
                interval_ms: None
            })
        );
    }

    #[test]
    fn url_wins_over_profile() {
        let pf = file_with("lab", "http://lab");
        assert_eq!(
            req(Some("lab"), Some("http://other"), None).resolve(&pf, "http://d"),
            ResolveProfile::Direct(ProfileEntry {
                url: "http://other".into(),
                interval_ms: None
            })
        );
    }
}
