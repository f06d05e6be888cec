//! Login form shown in the menu
//!
//! Collects a name and password and hands them to the application on Enter.
//! Validation messages expire on their own after a few seconds.

use crate::platform::Key;

pub const MAX_NAME_LEN: usize = 12;
pub const MAX_PASSWORD_LEN: usize = 16;

/// Which field receives typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Password,
}

/// Credentials submitted with Enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ErrorMessage {
    text: String,
    remaining: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
    pub active: Field,
    error: Option<ErrorMessage>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current validation message, if it hasn't expired
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.text.as_str())
    }

    pub fn can_submit(&self) -> bool {
        !self.name.is_empty() && !self.password.is_empty()
    }

    /// Password as shown on screen
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    fn show_error(&mut self, text: &str, seconds: f32) {
        self.error = Some(ErrorMessage {
            text: text.to_string(),
            remaining: seconds,
        });
    }

    /// Typed character. Names take letters, digits and spaces; passwords anything but spaces.
    pub fn on_text(&mut self, ch: char) {
        match self.active {
            Field::Name => {
                if (ch.is_alphanumeric() || ch == ' ')
                    && self.name.chars().count() < MAX_NAME_LEN
                {
                    self.name.push(ch);
                }
            }
            Field::Password => {
                if !ch.is_whitespace()
                    && !ch.is_control()
                    && self.password.chars().count() < MAX_PASSWORD_LEN
                {
                    self.password.push(ch);
                }
            }
        }
    }

    /// Key press. Returns the credentials when the form is submitted.
    pub fn on_key(&mut self, key: Key) -> Option<LoginRequest> {
        match key {
            Key::Enter => return self.submit(),
            Key::Tab => {
                self.active = match self.active {
                    Field::Name => Field::Password,
                    Field::Password => Field::Name,
                };
            }
            Key::Backspace => {
                match self.active {
                    Field::Name => self.name.pop(),
                    Field::Password => self.password.pop(),
                };
            }
            _ => {}
        }
        None
    }

    fn submit(&mut self) -> Option<LoginRequest> {
        if self.name.is_empty() {
            self.active = Field::Name;
            self.show_error("Enter a user name!", 2.0);
            return None;
        }
        if self.password.is_empty() {
            self.active = Field::Password;
            self.show_error("Enter a password!", 2.0);
            return None;
        }
        Some(LoginRequest {
            name: self.name.clone(),
            password: self.password.clone(),
        })
    }

    /// The store turned the credentials down
    pub fn reject(&mut self, message: &str) {
        self.name.clear();
        self.password.clear();
        self.active = Field::Name;
        self.show_error(message, 3.0);
    }

    /// Count down the validation message
    pub fn update(&mut self, dt: f32) {
        if let Some(error) = &mut self.error {
            error.remaining -= dt;
            if error.remaining <= 0.0 {
                self.error = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut LoginForm, s: &str) {
        for ch in s.chars() {
            form.on_text(ch);
        }
    }

    #[test]
    fn test_fill_and_submit() {
        let mut form = LoginForm::new();
        type_str(&mut form, "ann 2");
        form.on_key(Key::Tab);
        type_str(&mut form, "s3cr3t!");
        assert_eq!(form.masked_password(), "*******");
        assert_eq!(
            form.on_key(Key::Enter),
            Some(LoginRequest {
                name: "ann 2".into(),
                password: "s3cr3t!".into()
            })
        );
    }

    #[test]
    fn test_field_filters_and_limits() {
        let mut form = LoginForm::new();
        type_str(&mut form, "a_b-c!");
        assert_eq!(form.name, "abc");
        type_str(&mut form, "defghijklmnopq");
        assert_eq!(form.name.len(), MAX_NAME_LEN);

        form.on_key(Key::Tab);
        type_str(&mut form, "no spaces here");
        assert_eq!(form.password, "nospaceshere");
        type_str(&mut form, "0123456789");
        assert_eq!(form.password.len(), MAX_PASSWORD_LEN);
    }

    #[test]
    fn test_backspace_edits_active_field() {
        let mut form = LoginForm::new();
        type_str(&mut form, "ann");
        form.on_key(Key::Backspace);
        assert_eq!(form.name, "an");
        form.on_key(Key::Tab);
        form.on_key(Key::Backspace);
        assert_eq!(form.name, "an");
    }

    #[test]
    fn test_missing_fields_report_and_expire() {
        let mut form = LoginForm::new();
        assert_eq!(form.on_key(Key::Enter), None);
        assert_eq!(form.error(), Some("Enter a user name!"));
        assert_eq!(form.active, Field::Name);

        type_str(&mut form, "ann");
        assert_eq!(form.on_key(Key::Enter), None);
        assert_eq!(form.error(), Some("Enter a password!"));
        assert_eq!(form.active, Field::Password);

        form.update(1.5);
        assert!(form.error().is_some());
        form.update(0.6);
        assert!(form.error().is_none());
    }

    #[test]
    fn test_reject_clears_form() {
        let mut form = LoginForm::new();
        type_str(&mut form, "ann");
        form.on_key(Key::Tab);
        type_str(&mut form, "pw");
        form.reject("Wrong password!");
        assert!(form.name.is_empty() && form.password.is_empty());
        assert_eq!(form.active, Field::Name);
        assert_eq!(form.error(), Some("Wrong password!"));
        assert!(!form.can_submit());
    }
}
