pub mod certificate;

pub use certificate::{generate_certificate, CertificateData};
