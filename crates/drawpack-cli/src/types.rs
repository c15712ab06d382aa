use std::path::PathBuf;

use drawpack_core::ManifestBuild;
use drawpack_ingest::PackageInfo;
use drawpack_report::BundlePlan;

#[derive(Debug)]
pub struct PreviewResult {
    pub info: PackageInfo,
    pub build: ManifestBuild,
    pub tree: String,
}

#[derive(Debug)]
pub struct BuildResult {
    pub info: PackageInfo,
    pub build: ManifestBuild,
    pub plan: BundlePlan,
    /// Written bundle; `None` on a dry run.
    pub bundle_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct MailResult {
    pub mailto: String,
    /// Written `.eml`, when one was requested.
    pub eml_path: Option<PathBuf>,
}
