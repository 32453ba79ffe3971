use std::{collections::BTreeMap, io::ErrorKind, path::Path};

use api_types::Items;

use crate::{
    EngineError, ResultEngine,
    botw::{
        CookingPotFoods, Critters, Effects, Elixirs, FrozenFoods, Images, Ingredients,
        MonsterParts, OtherFoods, RoastedFoods,
    },
    resource::Resource,
};

use super::Engine;

/// Rows inserted per fixture, keyed by resource name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: BTreeMap<&'static str, usize>,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.inserted.values().sum()
    }
}

impl Engine {
    /// Load the game reference fixtures from `dir`.
    ///
    /// Each table reads `<dir>/<name>.json` shaped as `{"items": [...]}`.
    /// Missing files are skipped and rows that collide with existing ones are
    /// left alone, so running it twice inserts nothing the second time.
    pub async fn seed(&self, dir: &Path) -> ResultEngine<SeedReport> {
        let mut report = SeedReport::default();
        self.seed_table::<Images>(dir, &mut report).await?;
        self.seed_table::<Effects>(dir, &mut report).await?;
        self.seed_table::<Critters>(dir, &mut report).await?;
        self.seed_table::<Ingredients>(dir, &mut report).await?;
        self.seed_table::<Elixirs>(dir, &mut report).await?;
        self.seed_table::<MonsterParts>(dir, &mut report).await?;
        self.seed_table::<CookingPotFoods>(dir, &mut report).await?;
        self.seed_table::<RoastedFoods>(dir, &mut report).await?;
        self.seed_table::<FrozenFoods>(dir, &mut report).await?;
        self.seed_table::<OtherFoods>(dir, &mut report).await?;

        tracing::info!(total = report.total(), "seed finished");
        Ok(report)
    }

    async fn seed_table<R: Resource>(&self, dir: &Path, report: &mut SeedReport) -> ResultEngine<()> {
        let path = dir.join(format!("{}.json", R::NAME));
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "seed file missing, skipping");
                return Ok(());
            }
            Err(err) => {
                return Err(EngineError::Seed(format!("{}: {err}", path.display())));
            }
        };

        let fixture: Items<R::Item> = serde_json::from_str(&raw)
            .map_err(|err| EngineError::Seed(format!("{}: {err}", path.display())))?;

        let service = self.service::<R>();
        let mut inserted = 0;
        for item in fixture.items {
            match service.add(item, "").await {
                Ok(_) => inserted += 1,
                Err(EngineError::ExistingKey(key)) => {
                    tracing::debug!(resource = R::NAME, key, "seed row already present");
                }
                Err(err) => return Err(err),
            }
        }

        tracing::debug!(resource = R::NAME, inserted, "seeded table");
        report.inserted.insert(R::NAME, inserted);
        Ok(())
    }
}
