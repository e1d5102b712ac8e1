//! Shared test helpers: temporary git repositories with real content.

use std::path::Path;

use git2::{Commit, IndexAddOption, Repository};

pub fn init_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    repo
}

/// Stage everything and commit it.
pub fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = repo.signature().unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    let object = repo.find_object(head.id(), None).unwrap();
    repo.tag_lightweight(name, &object, false).unwrap();
}

pub const SCHEMATIC: &str = r#"(kicad_sch
  (uuid "e63e39d7")
  (title_block
    (title "Main board")
    (rev "v0")
    (date "2000-01-01")
  )
  (symbol
    (property "Reference" "R1" (at 0 0 0))
  )
)
"#;
