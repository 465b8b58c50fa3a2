use serde::Serialize;

/// Bio used when onboarding leaves it blank
pub const DEFAULT_BIO: &str = "FocusFlow Pro user";

const MIN_NAME_CHARS: usize = 2;

/// The locally stored profile. Identifies "the user" to the UI; not a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    /// Validate form input. Returns None when the name is too short.
    /// Blank optional fields become None.
    pub fn from_form(name: &str, bio: &str, avatar: &str, email: &str) -> Option<Self> {
        let name = name.trim();
        if !is_valid_name(name) {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            bio: non_blank(bio),
            avatar: non_blank(avatar),
            email: non_blank(email),
        })
    }

    /// First-run variant: a blank bio gets the default greeting
    pub fn onboard(name: &str, bio: &str, avatar: &str, email: &str) -> Option<Self> {
        let mut profile = Self::from_form(name, bio, avatar, email)?;
        if profile.bio.is_none() {
            profile.bio = Some(DEFAULT_BIO.to_string());
        }
        Some(profile)
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_CHARS
}

pub fn name_error() -> String {
    format!("Name must be at least {} characters.", MIN_NAME_CHARS)
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// External "is the session still valid" check. Not a security boundary:
/// a failed check only sends the user back to the profile screen.
pub trait SessionCheck {
    fn is_authenticated(&self) -> bool;
}

/// Default provider: the local profile is all there is
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSession;

impl SessionCheck for LocalSession {
    fn is_authenticated(&self) -> bool {
        true
    }
}

/// Which screen the profile gate lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Onboarding,
    Dashboard,
}

pub fn resolve_gate(profile: Option<&UserProfile>, session: &dyn SessionCheck) -> Gate {
    match profile {
        Some(_) if session.is_authenticated() => Gate::Dashboard,
        _ => Gate::Onboarding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Expired;

    impl SessionCheck for Expired {
        fn is_authenticated(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_name_validation() {
        assert!(UserProfile::from_form("A", "", "", "").is_none());
        assert!(UserProfile::from_form("  A  ", "", "", "").is_none());
        assert!(UserProfile::from_form("Al", "", "", "").is_some());
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let profile = UserProfile::from_form("Ada Lovelace", " ", "", "ada@example.com").unwrap();
        assert_eq!(profile.bio, None);
        assert_eq!(profile.avatar, None);
        assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
        assert_eq!(profile.first_name(), "Ada");
    }

    #[test]
    fn test_onboard_defaults_bio() {
        let profile = UserProfile::onboard("Sam", "", "", "").unwrap();
        assert_eq!(profile.bio.as_deref(), Some(DEFAULT_BIO));

        let profile = UserProfile::onboard("Sam", "Writer", "", "").unwrap();
        assert_eq!(profile.bio.as_deref(), Some("Writer"));
    }

    #[test]
    fn test_gate() {
        let profile = UserProfile::from_form("Sam", "", "", "").unwrap();
        assert_eq!(resolve_gate(None, &LocalSession), Gate::Onboarding);
        assert_eq!(resolve_gate(Some(&profile), &LocalSession), Gate::Dashboard);
        assert_eq!(resolve_gate(Some(&profile), &Expired), Gate::Onboarding);
    }
}
