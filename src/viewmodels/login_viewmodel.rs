// ============================================================================
// LOGIN VIEWMODEL - Idle → Submitting → Succeeded | Idle + error
// ============================================================================

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub phase: LoginPhase,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn is_submitting(&self) -> bool {
        self.phase == LoginPhase::Submitting
    }

    /// Botón de submit habilitado
    pub fn can_submit(&self) -> bool {
        self.phase == LoginPhase::Idle
    }

    /// `None` si ya hay un envío en curso
    pub fn submit(&self) -> Option<Self> {
        self.can_submit().then(|| Self {
            phase: LoginPhase::Submitting,
            error: None,
        })
    }

    pub fn finish<T>(&self, result: &Result<T, AppError>) -> Self {
        match result {
            Ok(_) => Self {
                phase: LoginPhase::Succeeded,
                error: None,
            },
            Err(err) => Self {
                phase: LoginPhase::Idle,
                error: Some(err.user_message()),
            },
        }
    }
}
