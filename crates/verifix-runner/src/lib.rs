pub mod config;
pub mod doctor;
pub mod runner;
pub mod scenario;
pub mod util;

pub use config::*;
pub use doctor::*;
pub use runner::*;
pub use util::*;

#[cfg(test)]
mod fixture_tests {
    use std::path::Path;

    #[test]
    fn loads_and_compiles_sc01_suite() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../fixtures/scenarios/SC-01-all-present/suite.yaml");
        let spec = verifix_suite::load_suite(&path).unwrap();
        let suite = verifix_suite::compile_suite(&spec).unwrap();
        assert_eq!(suite.name, "critical-fixes");
        assert!(!suite.criteria.is_empty());
        assert_eq!(suite.hash.len(), 64);
    }
}
