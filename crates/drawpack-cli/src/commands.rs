use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use drawpack_cli::config::{FileConfig, FlagOverrides, load_config};
use drawpack_core::{ManifestBuild, build_manifest_detailed, tree};
use drawpack_ingest::{PackageInfo, ZipSource, inspect};
use drawpack_report::{
    TemplateCache, draft_request_eml, draft_request_mail, manifest_json, plan_bundle,
    save_bundle, write_manifest_json,
};
use tracing::{info, info_span};

use crate::cli::{BuildArgs, MailArgs, ManifestArgs, PackageArgs};
use crate::types::{BuildResult, MailResult, PreviewResult};

/// An opened upload with its manifest computed.
struct LoadedPackage {
    source: ZipSource<File>,
    info: PackageInfo,
    build: ManifestBuild,
    config: FileConfig,
    flags: FlagOverrides,
}

fn load_package(args: &PackageArgs, mail_template: Option<PathBuf>) -> Result<LoadedPackage> {
    let span = info_span!("load", archive = %args.archive.display());
    let _guard = span.enter();

    let config = load_config(args.config.as_deref())?;
    let flags = args.overrides(mail_template);

    let mut source = ZipSource::open(&args.archive)
        .with_context(|| format!("open upload {}", args.archive.display()))?;
    let info = inspect(&mut source).context("inspect upload")?;

    let options = config.classification_options(&flags, |mode| info.suggested_root(mode));
    let build = build_manifest_detailed(&info.entries, &options);
    info!(
        root = %options.root,
        mode = %options.mode,
        items = build.manifest.item_count(),
        groups = build.manifest.group_count(),
        excluded = build.excluded_count(),
        "manifest ready"
    );

    Ok(LoadedPackage {
        source,
        info,
        build,
        config,
        flags,
    })
}

pub fn run_preview(args: &PackageArgs) -> Result<PreviewResult> {
    let package = load_package(args, None)?;
    let tree = tree::render(&package.build.manifest.items);
    Ok(PreviewResult {
        info: package.info,
        build: package.build,
        tree,
    })
}

pub fn run_manifest(args: &ManifestArgs) -> Result<()> {
    let package = load_package(&args.package, None)?;
    let manifest = &package.build.manifest;
    match &args.output {
        Some(path) => {
            write_manifest_json(path, manifest)
                .with_context(|| format!("write manifest {}", path.display()))?;
            info!(output = %path.display(), "manifest written");
        }
        None => println!("{}", manifest_json(manifest).context("render manifest")?),
    }
    Ok(())
}

pub fn run_build(args: &BuildArgs) -> Result<BuildResult> {
    let mut package = load_package(&args.package, None)?;
    let span = info_span!("build", root = %package.build.manifest.root);
    let _guard = span.enter();

    if package.build.manifest.is_empty() {
        bail!("no files found in PN/DRW folders");
    }
    let plan = plan_bundle(&package.build.manifest, &package.info, &mut package.source)
        .context("assemble bundle")?;

    let bundle_path = if args.dry_run {
        info!(bundle = %plan.file_name, "dry run, bundle not written");
        None
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.package.archive));
        let path = save_bundle(&plan, &output_dir)
            .with_context(|| format!("write bundle to {}", output_dir.display()))?;
        info!(output = %path.display(), "bundle written");
        Some(path)
    };

    Ok(BuildResult {
        info: package.info,
        build: package.build,
        plan,
        bundle_path,
    })
}

pub fn run_mail(args: &MailArgs) -> Result<MailResult> {
    let mut package = load_package(&args.package, args.template.clone())?;
    let templates = TemplateCache::new(package.config.mail_template(&package.flags));
    let Some(draft) = draft_request_mail(
        package.build.manifest.mode,
        &package.info.id,
        &package.info.title,
        &templates,
    ) else {
        bail!("mail drafts are only available in rfq mode");
    };
    info!(subject = %draft.subject, "mail draft ready");

    let eml_path = match &args.eml {
        Some(target) => {
            let span = info_span!("eml", target = %target.display());
            let _guard = span.enter();
            if package.build.manifest.is_empty() {
                bail!("no files found in PN/DRW folders");
            }
            let plan = plan_bundle(&package.build.manifest, &package.info, &mut package.source)
                .context("assemble bundle")?;
            let eml = draft_request_eml(&plan, &package.info.id, &package.info.title, &templates)
                .context("build request mail")?
                .context("request mail is only available in rfq mode")?;
            let path = eml
                .save(target)
                .with_context(|| format!("write request mail to {}", target.display()))?;
            Some(path)
        }
        None => None,
    };

    Ok(MailResult {
        mailto: draft.mailto(),
        eml_path,
    })
}

/// Directory holding the upload, or the working directory.
fn default_output_dir(archive: &Path) -> PathBuf {
    archive
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
