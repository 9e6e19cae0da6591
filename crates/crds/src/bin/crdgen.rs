//! Prints the NodeConfiguration CRD as YAML, ready for `kubectl apply -f -`.

use crds::NodeConfiguration;
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&NodeConfiguration::crd())?);
    Ok(())
}
