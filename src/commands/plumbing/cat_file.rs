use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, object_id: &str) -> Result<()> {
        let object_id = ObjectId::try_parse(object_id.to_string())?;
        let commit = self.database().load(&object_id)?;

        writeln!(self.writer(), "{}", commit.display())?;

        Ok(())
    }
}
