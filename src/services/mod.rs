//! Business services containing the MFA enrollment and verification flows.

pub mod enrollment;
pub mod otp;
pub mod owner_lock;
pub mod verification;

// Re-export commonly used types
pub use enrollment::{
    CompleteSetupResult, EnrollmentConfig, EnrollmentService, InitSetupResult, RemoveSetupOutcome,
};
pub use otp::{TotpConfig, TotpGenerator};
pub use owner_lock::OwnerLockMap;
pub use verification::{
    VerificationConfig, VerificationService, VerificationTokenIssuer, VerifySuccess,
};
