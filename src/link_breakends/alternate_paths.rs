use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use log::info;

use super::transitive_links::TransitiveLinkFinder;
use crate::breakend::SvData;
use crate::link::{Link, reverse_link_chain};
use crate::link_store::LinkStore;
use crate::variant_store::VariantStore;

/// Chain of links re-deriving the mate relationship of `breakend` and `mate`
///
/// The chain starts at an alternative of `breakend` and ends at a breakend equivalent to `mate`.
///
#[derive(Clone, Debug)]
pub struct AlternatePath {
    pub breakend: usize,
    pub mate: usize,
    pub links: Vec<Link>,
}

impl AlternatePath {
    /// The same path described from the mate's side
    fn mirror(&self) -> Self {
        Self {
            breakend: self.mate,
            mate: self.breakend,
            links: reverse_link_chain(&self.links),
        }
    }

    /// Ids of the breakends visited by the path, in order
    pub fn path_vcf_ids(&self, store: &VariantStore) -> Vec<String> {
        let mut ids = Vec::new();
        if let Some(first) = self.links.first() {
            ids.push(store.breakend(first.start).id.clone());
        }
        ids.extend(self.links.iter().map(|x| store.breakend(x.end).id.clone()));
        ids
    }

    pub fn transitive_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|x| x.is_transitive())
    }

    /// Compact rendering of the path, such as "bnd3-bnd4<asm1-1>bnd5-bnd6"
    ///
    /// Breakend ids alternate with link markers, where '-' is a same-SV pairing and any other
    /// link is shown by its id in angle brackets.
    ///
    pub fn path_string(&self, store: &VariantStore) -> String {
        let mut path = String::new();
        if let Some(first) = self.links.first() {
            path.push_str(&store.breakend(first.start).id);
        }
        for link in self.links.iter() {
            if link.is_pair() {
                path.push('-');
            } else {
                path.push('<');
                path.push_str(&link.id);
                path.push('>');
            }
            path.push_str(&store.breakend(link.end).id);
        }
        path
    }
}

/// Results of the alternate path search over all breakends
#[derive(Default)]
pub struct AlternatePaths {
    pub paths: BTreeMap<usize, AlternatePath>,

    /// Breakends for which the search ran and found no path
    pub failed: BTreeSet<usize>,
}

/// Search shared state for one worker pool run
struct PathSearchShared<'a> {
    finder: TransitiveLinkFinder<'a>,
    store: &'a VariantStore,
    paths: Mutex<BTreeMap<usize, AlternatePath>>,
    failed: Mutex<BTreeSet<usize>>,
}

impl PathSearchShared<'_> {
    fn has_result(&self, breakend_index: usize) -> bool {
        self.paths.lock().unwrap().contains_key(&breakend_index)
            || self.failed.lock().unwrap().contains(&breakend_index)
    }

    fn search_breakend(&self, breakend_index: usize, debug: bool) {
        let mate = self.store.mate(breakend_index);
        if self.has_result(mate) {
            return;
        }

        let links = self.finder.find_transitive_links(breakend_index, debug);
        if links.is_empty() {
            self.failed.lock().unwrap().insert(breakend_index);
        } else {
            let path = AlternatePath {
                breakend: breakend_index,
                mate,
                links,
            };
            let mirror = path.mirror();
            let mut paths = self.paths.lock().unwrap();
            paths.insert(breakend_index, path);
            paths.insert(mate, mirror);
        }
    }

    fn search_sv(&self, sv: &SvData) {
        for breakend_index in sv.breakends() {
            self.search_breakend(breakend_index, false);
        }
    }
}

/// Find an alternate path for every breakend of every non-single SV
///
/// Each SV is searched as a separate task on a worker pool of `thread_count` threads. Once a
/// path is found for one breakend, its mirror is recorded for the mate without another search,
/// and once a search fails the mate is skipped.
///
/// If `target_breakend` is given, only that breakend is searched, and its search trace is
/// printed to stderr.
///
pub fn find_alternate_paths(
    store: &VariantStore,
    assembly_links: &LinkStore,
    thread_count: usize,
    target_breakend: Option<usize>,
) -> AlternatePaths {
    let shared = PathSearchShared {
        finder: TransitiveLinkFinder::new(store, assembly_links),
        store,
        paths: Mutex::new(BTreeMap::new()),
        failed: Mutex::new(BTreeSet::new()),
    };

    if let Some(breakend_index) = target_breakend {
        if !store.is_single(breakend_index) {
            shared.search_breakend(breakend_index, true);
        }
    } else {
        let worker_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .unwrap();

        let shared = &shared;
        worker_pool.scope(move |scope| {
            for sv in store.svs().iter().filter(|x| !x.is_single()) {
                scope.spawn(move |_| {
                    shared.search_sv(sv);
                });
            }
        });
    }

    let paths = shared.paths.into_inner().unwrap();
    let failed = shared.failed.into_inner().unwrap();
    info!(
        "Found alternate paths for {} breakends, no path for {} breakends",
        paths.len(),
        failed.len()
    );
    AlternatePaths { paths, failed }
}

/// Build a link store from the transitive links of every alternate path
///
/// Each link is keyed by its own start breakend.
///
pub fn create_transitive_link_store(paths: &BTreeMap<usize, AlternatePath>) -> LinkStore {
    let mut transitive_links = LinkStore::default();
    for path in paths.values() {
        for link in path.transitive_links() {
            transitive_links.add_link(link.start, link.clone());
        }
    }
    transitive_links
}
