use chrono::{Duration, Utc};

use crate::db::Db;
use crate::error::RepoResult;
use crate::repos::{BusinessRepo, CreateBusiness, CreatePerson, CreatePost, PersonRepo, PostRepo};

/// Populate an empty store with a small demo dataset.
pub fn seed(db: &Db) -> RepoResult<()> {
    if !db.read().people.is_empty() {
        tracing::info!("store already populated, skipping seed");
        return Ok(());
    }

    let people = PersonRepo::new(db.clone());
    let businesses = BusinessRepo::new(db.clone());
    let posts = PostRepo::new(db.clone());

    let authors = [
        ("Ada Lovelace", Some(36)),
        ("Alan Turing", Some(41)),
        ("Grace Hopper", Some(85)),
    ]
    .into_iter()
    .map(|(name, age)| {
        people.create(CreatePerson {
            name: name.to_string(),
            age,
        })
    })
    .collect::<RepoResult<Vec<_>>>()?;

    for (name, employee_count) in [("Analytical Engines Ltd", 12), ("Bletchley Works", 250)] {
        businesses.create(CreateBusiness {
            name: name.to_string(),
            employee_count,
        })?;
    }

    let now = Utc::now();
    for author in &authors {
        for n in 1..=4 {
            posts.create(CreatePost {
                author_id: author.id,
                title: format!("Notes #{n} by {}", author.name),
                body: format!("Entry {n} from the notebook of {}.", author.name),
                published_at: Some(now - Duration::days(n)),
            })?;
        }
    }

    tracing::info!(
        people = people.count(),
        businesses = businesses.count(),
        posts = posts.count(),
        "seeded demo data"
    );
    Ok(())
}
