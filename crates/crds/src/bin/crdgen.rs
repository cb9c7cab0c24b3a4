//! Print the ClickHouseInstallation CRD as YAML
//!
//! Usage: `cargo run -p crds --bin crdgen > clickhouseinstallation.yaml`

use crds::ClickHouseInstallation;
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&ClickHouseInstallation::crd())?);
    Ok(())
}
