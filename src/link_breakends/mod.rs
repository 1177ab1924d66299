mod alternate_paths;
mod assembly_links;
mod dsb_links;
mod transitive_links;

use std::collections::BTreeSet;

use log::info;

pub use self::alternate_paths::AlternatePaths;
use self::alternate_paths::{create_transitive_link_store, find_alternate_paths};
use self::assembly_links::build_assembly_links;
use self::dsb_links::DsbLinkFinder;
use crate::link_store::LinkStore;
use crate::variant_store::VariantStore;

/// All link stores produced from one variant store
pub struct BreakendLinks {
    pub assembly_links: LinkStore,
    pub dsb_links: LinkStore,

    /// Transitive links taken from every alternate path
    pub transitive_links: LinkStore,

    /// Union of the assembly, transitive and double-strand break links, in that order
    pub combined_links: LinkStore,

    pub alternate_paths: AlternatePaths,
}

pub struct LinkSettings {
    pub thread_count: usize,

    /// Restrict the alternate path search to this breakend
    pub target_breakend: Option<usize>,

    pub find_dsb_links: bool,
}

/// Run every breakend linking stage
///
/// Assembly links are found first, since both the double-strand break and alternate path
/// searches depend on them.
///
pub fn link_all_breakends(
    store: &VariantStore,
    excluded_breakends: &BTreeSet<usize>,
    settings: &LinkSettings,
) -> BreakendLinks {
    info!("Building assembly links");
    let assembly_links = build_assembly_links(store);

    let dsb_links = if settings.find_dsb_links {
        info!("Finding double-strand break links");
        DsbLinkFinder::find_breaks(store, &assembly_links, excluded_breakends)
    } else {
        LinkStore::default()
    };

    info!("Finding alternate paths");
    let alternate_paths = find_alternate_paths(
        store,
        &assembly_links,
        settings.thread_count,
        settings.target_breakend,
    );
    let transitive_links = create_transitive_link_store(&alternate_paths.paths);

    let combined_links = LinkStore::merge(
        &LinkStore::merge(&assembly_links, &transitive_links),
        &dsb_links,
    );

    BreakendLinks {
        assembly_links,
        dsb_links,
        transitive_links,
        combined_links,
        alternate_paths,
    }
}
