//! Manifest construction over a full entry list.

use std::collections::{BTreeMap, HashMap};

use drawpack_model::{ClassificationOptions, DrawingGroup, Manifest, SourceEntry};
use tracing::debug;

use crate::classify::{Exclusion, classify_detailed};
use crate::natural::{caseless_cmp, sort_natural};

/// A manifest together with counts of the entries left out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestBuild {
    pub manifest: Manifest,
    pub exclusions: BTreeMap<Exclusion, usize>,
}

impl ManifestBuild {
    pub fn excluded_count(&self) -> usize {
        self.exclusions.values().sum()
    }
}

/// Builds the manifest for `entries`.
///
/// Items keep input order. Groups are keyed by `part_number + "/" +
/// drawing_folder`, file names within a group are in natural order, and
/// groups are ordered by `part_number + drawing_folder` ignoring case. Pure and
/// deterministic: identical inputs give identical manifests.
pub fn build_manifest(entries: &[SourceEntry], options: &ClassificationOptions) -> Manifest {
    build_manifest_detailed(entries, options).manifest
}

/// Like [`build_manifest`], also counting exclusions by reason.
pub fn build_manifest_detailed(
    entries: &[SourceEntry],
    options: &ClassificationOptions,
) -> ManifestBuild {
    let mut items = Vec::new();
    let mut exclusions: BTreeMap<Exclusion, usize> = BTreeMap::new();
    for entry in entries {
        match classify_detailed(entry, options) {
            Ok(item) => items.push(item),
            Err(reason) => *exclusions.entry(reason).or_default() += 1,
        }
    }

    // Key collisions across the part/drawing boundary are possible in
    // principle (`PN-A` + `/DRW-B` vs `PN-A/` + `DRW-B`); segments never
    // contain `/`, so real inputs cannot trigger it.
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, DrawingGroup> = HashMap::new();
    for item in items.iter().filter(|item| item.is_drawing()) {
        let key = item.group_key();
        let group = by_key.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            DrawingGroup::new(&item.part_number, &item.drawing_folder)
        });
        group.file_names.push(item.file_name.clone());
    }
    let mut groups: Vec<DrawingGroup> = order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .map(|mut group| {
            sort_natural(&mut group.file_names);
            group
        })
        .collect();
    groups.sort_by(|a, b| caseless_cmp(&a.sort_key(), &b.sort_key()));

    debug!(
        root = %options.root,
        mode = %options.mode,
        entry_count = entries.len(),
        item_count = items.len(),
        group_count = groups.len(),
        excluded = exclusions.values().sum::<usize>(),
        "manifest built"
    );

    ManifestBuild {
        manifest: Manifest {
            root: options.root.clone(),
            mode: options.mode,
            items,
            groups,
        },
        exclusions,
    }
}

#[cfg(test)]
mod tests {
    use drawpack_model::Mode;

    use super::*;

    fn entries(paths: &[&str]) -> Vec<SourceEntry> {
        paths.iter().copied().map(SourceEntry::from).collect()
    }

    #[test]
    fn group_file_names_use_natural_order() {
        let options = ClassificationOptions::new(Mode::Rfq, "Out");
        let manifest = build_manifest(&entries(&["R/PN1/DRW1/10.pdf", "R/PN1/DRW1/2.pdf"]), &options);
        assert_eq!(manifest.groups.len(), 1);
        assert_eq!(manifest.groups[0].file_names, vec!["2.pdf", "10.pdf"]);
        // items keep input order
        assert_eq!(manifest.items[0].file_name, "10.pdf");
    }

    #[test]
    fn groups_sorted_by_concatenated_key() {
        let options = ClassificationOptions::new(Mode::Po, "Out");
        let manifest = build_manifest(
            &entries(&[
                "R/PNB/DRW1/a.pdf",
                "R/PNA/DRW2/a.pdf",
                "R/PNA/DRW1/a.pdf",
            ]),
            &options,
        );
        let keys: Vec<String> = manifest.groups.iter().map(DrawingGroup::sort_key).collect();
        assert_eq!(keys, vec!["PNADRW1", "PNADRW2", "PNBDRW1"]);
    }

    #[test]
    fn group_order_ignores_case() {
        let options = ClassificationOptions::new(Mode::Po, "Out");
        let manifest = build_manifest(
            &entries(&["R/PNB1/DRW1/a.pdf", "R/PNa1/DRW1/a.pdf", "R/PNA1/DRW1/a.pdf"]),
            &options,
        );
        let keys: Vec<String> = manifest.groups.iter().map(DrawingGroup::sort_key).collect();
        assert_eq!(keys, vec!["PNA1DRW1", "PNa1DRW1", "PNB1DRW1"]);
    }

    #[test]
    fn attachments_are_not_grouped() {
        let options = ClassificationOptions::new(Mode::Po, "Out").with_include_unclassified(true);
        let build = build_manifest_detailed(
            &entries(&["R/PN1/DRW1/a.pdf", "R/loose.txt", "R/.DS_Store"]),
            &options,
        );
        assert_eq!(build.manifest.items.len(), 2);
        assert_eq!(build.manifest.groups.len(), 1);
        assert_eq!(build.manifest.attachments().count(), 1);
        assert_eq!(build.exclusions.get(&Exclusion::Junk), Some(&1));
        assert_eq!(build.excluded_count(), 1);
    }

    #[test]
    fn exclusions_are_counted_by_reason() {
        let options = ClassificationOptions::new(Mode::Rfq, "Out");
        let build = build_manifest_detailed(
            &entries(&["R/PN1/DRW1/a.dxf", "R/PN1/b.pdf", "R/PN1/DRW1/c.pdf"]),
            &options,
        );
        assert_eq!(build.manifest.items.len(), 1);
        assert_eq!(build.exclusions.get(&Exclusion::Extension), Some(&1));
        assert_eq!(build.exclusions.get(&Exclusion::NoStructure), Some(&1));
    }
}
