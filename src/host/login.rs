// Admin login form shown on the lock screen and behind F2

use tracing::info;

use crate::session::SessionGate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Username,
    Secret,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub secret: String,
    pub focus: Field,
    /// Inline error from the last rejected attempt
    pub message: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) {
        self.field_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }

    pub fn toggle_field(&mut self) {
        self.focus = match self.focus {
            Field::Username => Field::Secret,
            Field::Secret => Field::Username,
        };
    }

    /// Secret rendered as bullets
    pub fn masked_secret(&self) -> String {
        "•".repeat(self.secret.chars().count())
    }

    /// Check the pair against the gate; a match unlocks the session.
    ///
    /// Returns whether the desktop was unlocked. A rejection clears the secret
    /// and keeps the form open with the error text.
    pub fn submit(&mut self, gate: &mut SessionGate) -> bool {
        match gate.submit_credentials(self.username.trim(), &self.secret) {
            Ok(()) => {
                gate.unlock();
                info!("[LOGIN] session unlocked by admin");
                *self = Self::new();
                true
            }
            Err(e) => {
                self.message = Some(e.to_string());
                self.secret.clear();
                self.focus = Field::Secret;
                false
            }
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Secret => &mut self.secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::credentials::Credentials;
    use crate::session::GateState;

    fn type_str(form: &mut LoginForm, text: &str) {
        text.chars().for_each(|c| form.push(c));
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = LoginForm::new();
        type_str(&mut form, "admin");
        form.toggle_field();
        type_str(&mut form, "zenuz");
        form.backspace();
        form.push('x');

        assert_eq!(form.username, "admin");
        assert_eq!(form.secret, "zenux");
        assert_eq!(form.masked_secret(), "•••••");
    }

    #[test]
    fn test_rejected_submit_keeps_gate_locked() {
        let mut gate = SessionGate::new(1000, Credentials::default());
        gate.start(0);
        gate.poll(1000);

        let mut form = LoginForm::new();
        type_str(&mut form, "admin");
        form.toggle_field();
        type_str(&mut form, "guess");

        assert!(!form.submit(&mut gate));
        assert_eq!(form.message.as_deref(), Some("Invalid admin credentials."));
        assert!(form.secret.is_empty());
        assert_eq!(gate.state(), GateState::Expired);
        assert!(!gate.is_admin());
    }

    #[test]
    fn test_accepted_submit_unlocks_and_resets() {
        let mut gate = SessionGate::new(1000, Credentials::default());
        gate.start(0);
        gate.poll(1000);

        let mut form = LoginForm::new();
        type_str(&mut form, " admin ");
        form.toggle_field();
        type_str(&mut form, "zenux");

        assert!(form.submit(&mut gate));
        assert_eq!(gate.state(), GateState::Active);
        assert!(gate.is_unlocked());
        assert!(form.username.is_empty() && form.message.is_none());
    }
}
