use crate::config::AccessConfig;
use derive_more::Display;
use rotary::Code;

/// What the host tells the user after a code is dialed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Verdict {
    #[display("Access granted")]
    Granted,
    #[display("Incorrect pin : {_0}")]
    Denied(Code),
    #[display("Code entered : {_0}")]
    Entered(Code),
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    pin: Option<Code>,
}

impl AccessPolicy {
    pub fn new(pin: Option<Code>) -> Self {
        Self { pin }
    }

    pub fn from_config(config: &AccessConfig) -> Self {
        Self::new(config.pin.clone())
    }

    pub fn check(&self, code: &Code) -> Verdict {
        match &self.pin {
            Some(pin) if pin == code => Verdict::Granted,
            Some(_) => Verdict::Denied(code.clone()),
            None => Verdict::Entered(code.clone()),
        }
    }
}
