use crate::areas::config::Config;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Entity, Error, Result};
use std::fs;
use std::io::Write;

impl Repository {
    /// Create `.twig` with an empty object store, HEAD on the default branch,
    /// a config file and an empty index
    pub async fn init(&mut self) -> Result<()> {
        if self.refs().head_path().exists() {
            return Err(Error::already_exists(
                Entity::Repository,
                self.twig_path().display(),
            ));
        }

        fs::create_dir_all(self.database().objects_path())?;
        fs::create_dir_all(self.refs().heads_path())?;

        let config = Config::default();
        config.store(&self.config_path())?;

        let default_branch = BranchName::try_parse(config.default_branch.clone())?;
        self.refs().set_head(&default_branch)?;
        self.set_config(config);

        let index = self.index();
        let mut index = index.lock().await;
        // create the index file if it does not exist
        if !index.path().exists() {
            index.write_updates()?;
        }

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.twig_path().display()
        )?;

        Ok(())
    }
}
