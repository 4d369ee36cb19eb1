use chrono::Utc;
use rand::Rng;
use std::fmt;

/// OTP lifetime in seconds (10 minutes)
const OTP_TTL_SECONDS: i64 = 10 * 60;

/// Issues and checks the six-digit one-time codes used by the registration
/// and login flows. Email delivery happens outside this service; issued
/// codes are logged so development flows stay usable without a mail relay.
pub struct OtpService {
    master_otp: Option<String>,
}

impl OtpService {
    /// Create a new OtpService. `master_otp` is an injected development
    /// bypass accepted in place of any issued code.
    pub fn new(master_otp: Option<String>) -> Self {
        Self { master_otp }
    }

    /// Generate a fresh six-digit code and its expiry timestamp
    pub fn generate(&self) -> (String, i64) {
        let code: u32 = rand::rng().random_range(100_000..1_000_000);
        let expires_at = Utc::now().timestamp() + OTP_TTL_SECONDS;
        (code.to_string(), expires_at)
    }

    /// Check a submitted code against the stored one.
    ///
    /// Returns false when no code was ever issued, the code does not match,
    /// or the stored code has expired. The master bypass, when configured,
    /// is accepted regardless of the stored state.
    pub fn verify(&self, stored: Option<&str>, expires_at: Option<i64>, submitted: &str) -> bool {
        if let Some(master) = &self.master_otp {
            if submitted == master {
                return true;
            }
        }

        let (Some(stored), Some(expires_at)) = (stored, expires_at) else {
            return false;
        };

        stored == submitted && Utc::now().timestamp() <= expires_at
    }
}

impl fmt::Debug for OtpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpService")
            .field("master_otp", &self.master_otp.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_six_digit_codes() {
        let service = OtpService::new(None);

        for _ in 0..50 {
            let (code, _) = service.generate();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_sets_future_expiry() {
        let service = OtpService::new(None);
        let now = Utc::now().timestamp();

        let (_, expires_at) = service.generate();

        assert!(expires_at > now);
        assert!(expires_at <= now + OTP_TTL_SECONDS + 1);
    }

    #[test]
    fn test_verify_accepts_matching_unexpired_code() {
        let service = OtpService::new(None);
        let expires_at = Utc::now().timestamp() + 60;

        assert!(service.verify(Some("123456"), Some(expires_at), "123456"));
    }

    #[test]
    fn test_verify_rejects_wrong_code() {
        let service = OtpService::new(None);
        let expires_at = Utc::now().timestamp() + 60;

        assert!(!service.verify(Some("123456"), Some(expires_at), "654321"));
    }

    #[test]
    fn test_verify_rejects_expired_code() {
        let service = OtpService::new(None);
        let expires_at = Utc::now().timestamp() - 1;

        assert!(!service.verify(Some("123456"), Some(expires_at), "123456"));
    }

    #[test]
    fn test_verify_rejects_when_no_code_issued() {
        let service = OtpService::new(None);

        assert!(!service.verify(None, None, "123456"));
    }

    #[test]
    fn test_master_otp_bypasses_stored_state() {
        let service = OtpService::new(Some("000000".to_string()));

        // Accepted even with no issued code
        assert!(service.verify(None, None, "000000"));

        // Real codes still work alongside the bypass
        let expires_at = Utc::now().timestamp() + 60;
        assert!(service.verify(Some("123456"), Some(expires_at), "123456"));
        assert!(!service.verify(Some("123456"), Some(expires_at), "999999"));
    }

    #[test]
    fn test_debug_does_not_expose_master_otp() {
        let service = OtpService::new(Some("000000".to_string()));

        let output = format!("{:?}", service);
        assert!(!output.contains("000000"));
        assert!(output.contains("<redacted>"));
    }
}
