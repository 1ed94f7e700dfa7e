//! per-group settings, one json file per group
use {
    crate::{
        error::{FinderError, Result},
        rating::Rating,
    },
    serde::{Deserialize, Serialize},
    std::{
        fs::{self, File, OpenOptions},
        io::{BufReader, BufWriter, ErrorKind, Write},
        path::{Path, PathBuf},
    },
    tracing::{debug, info},
};

/// Settings owned by a single chat group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSettings {
    /// the rating filter applied to the group's searches
    #[serde(default)]
    pub rating: Rating,

    /// tags appended to every search the group performs
    #[serde(default, rename = "constants")]
    pub constant_tags: Vec<String>,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            rating: Rating::Safe,
            constant_tags: vec!["male".to_string()],
        }
    }
}

impl GroupSettings {
    /// add a constant tag, rejecting duplicates
    pub fn add_constant(&mut self, tag: &str) -> Result<()> {
        if self.constant_tags.iter().any(|t| t == tag) {
            return Err(FinderError::TagExists(tag.to_string()));
        }

        self.constant_tags.push(tag.to_string());
        Ok(())
    }

    /// remove a constant tag, rejecting tags that aren't present
    pub fn remove_constant(&mut self, tag: &str) -> Result<()> {
        let pos = self
            .constant_tags
            .iter()
            .position(|t| t == tag)
            .ok_or_else(|| FinderError::TagMissing(tag.to_string()))?;

        self.constant_tags.remove(pos);
        Ok(())
    }

    /// replace `old` with `new` at the same position
    pub fn replace_constant(&mut self, old: &str, new: &str) -> Result<()> {
        let pos = self
            .constant_tags
            .iter()
            .position(|t| t == old)
            .ok_or_else(|| FinderError::TagMissing(old.to_string()))?;

        if self.constant_tags.iter().any(|t| t == new) {
            return Err(FinderError::TagExists(new.to_string()));
        }

        self.constant_tags[pos] = new.to_string();
        Ok(())
    }
}

/// A single field of [`GroupSettings`] to overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupField {
    /// the rating filter
    Rating(Rating),
    /// the constant tag list
    ConstantTags(Vec<String>),
}

/// Reads and writes group settings under a data directory
///
/// There is no locking: two writers racing on the same group both read, both modify,
/// and the last one to write wins.
#[derive(Debug, Clone)]
pub struct GroupStore {
    /// the directory holding one `<group>.json` per group
    dir: PathBuf,
}

impl GroupStore {
    /// make a store rooted at `dir`, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "opened group store");
        Ok(Self { dir })
    }

    /// the directory the store writes to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// the settings file for a group
    pub fn path_for(&self, group: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(group)))
    }

    /// read a group's settings, returning the defaults if it has none yet
    pub fn read(&self, group: &str) -> Result<GroupSettings> {
        let path = self.path_for(group);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(group, "no settings yet, using defaults");
                return Ok(GroupSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings = serde_json::from_reader(BufReader::new(file))?;
        Ok(settings)
    }

    /// overwrite one field and rewrite the whole record
    pub fn write(&self, group: &str, field: GroupField) -> Result<GroupSettings> {
        self.update(group, |settings| {
            match field {
                GroupField::Rating(rating) => settings.rating = rating,
                GroupField::ConstantTags(tags) => settings.constant_tags = tags,
            }

            Ok(())
        })
    }

    /// read-modify-write a group's settings
    ///
    /// nothing is written if `f` fails
    pub fn update<F>(&self, group: &str, f: F) -> Result<GroupSettings>
    where
        F: FnOnce(&mut GroupSettings) -> Result<()>,
    {
        let mut settings = self.read(group)?;
        f(&mut settings)?;
        self.save(group, &settings)?;
        Ok(settings)
    }

    /// the group's rating filter
    pub fn rating(&self, group: &str) -> Result<Rating> {
        Ok(self.read(group)?.rating)
    }

    /// set the group's rating filter
    pub fn set_rating(&self, group: &str, rating: Rating) -> Result<GroupSettings> {
        self.write(group, GroupField::Rating(rating))
    }

    /// the group's constant tags
    pub fn constant_tags(&self, group: &str) -> Result<Vec<String>> {
        Ok(self.read(group)?.constant_tags)
    }

    /// add a constant tag to a group
    pub fn add_constant(&self, group: &str, tag: &str) -> Result<GroupSettings> {
        self.update(group, |s| s.add_constant(tag))
    }

    /// remove a constant tag from a group
    pub fn remove_constant(&self, group: &str, tag: &str) -> Result<GroupSettings> {
        self.update(group, |s| s.remove_constant(tag))
    }

    /// replace one of a group's constant tags
    pub fn replace_constant(&self, group: &str, old: &str, new: &str) -> Result<GroupSettings> {
        self.update(group, |s| s.replace_constant(old, new))
    }

    /// write the settings file
    fn save(&self, group: &str, settings: &GroupSettings) -> Result<()> {
        let path = self.path_for(group);
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)?;
        let mut w = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut w, settings)?;
        w.flush()?;

        debug!(group, path = %path.display(), "saved group settings");
        Ok(())
    }
}

/// turn a group identifier into a safe file name
///
/// ids are percent-encoded (dots and tildes included) so distinct groups never share a file
/// and no id can name a path outside the store. private chats have no group id and share the
/// `private` record
fn file_stem(group: &str) -> String {
    if group.trim().is_empty() {
        return "private".to_string();
    }

    urlencoding::encode(group)
        .replace('.', "%2E")
        .replace('~', "%7E")
}

#[cfg(test)]
mod tests {
    use {super::*, tempfile::TempDir};

    fn store() -> (TempDir, GroupStore) {
        let dir = TempDir::new().unwrap();
        let store = GroupStore::new(dir.path().join("groups")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_unknown_group_reads_defaults() {
        let (_dir, store) = store();
        let settings = store.read("12345").unwrap();
        assert_eq!(settings.rating, Rating::Safe);
        assert_eq!(settings.constant_tags, vec!["male".to_string()]);
        assert!(!store.path_for("12345").exists());
    }

    #[test]
    fn test_rating_round_trip() {
        let (_dir, store) = store();
        store
            .write("g", GroupField::Rating(Rating::Questionable))
            .unwrap();
        assert_eq!(store.read("g").unwrap().rating, Rating::Questionable);
        assert_eq!(store.rating("other").unwrap(), Rating::Safe);
    }

    #[test]
    fn test_file_layout() {
        let (_dir, store) = store();
        store.set_rating("g", Rating::Unrestricted).unwrap();
        let raw = fs::read_to_string(store.path_for("g")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["rating"], "all");
        assert_eq!(value["constants"], serde_json::json!(["male"]));
    }

    #[test]
    fn test_whole_record_rewrite_keeps_other_field() {
        let (_dir, store) = store();
        store.set_rating("g", Rating::Explicit).unwrap();
        store
            .write("g", GroupField::ConstantTags(vec!["a".into(), "b".into()]))
            .unwrap();
        let settings = store.read("g").unwrap();
        assert_eq!(settings.rating, Rating::Explicit);
        assert_eq!(settings.constant_tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_groups_are_isolated() {
        let (_dir, store) = store();
        store.add_constant("one", "wolf").unwrap();
        assert_eq!(store.constant_tags("two").unwrap(), vec!["male".to_string()]);
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let (_dir, store) = store();
        assert!(matches!(
            store.add_constant("g", "male"),
            Err(FinderError::TagExists(_))
        ));
        store.add_constant("g", "solo").unwrap();
        assert_eq!(
            store.constant_tags("g").unwrap(),
            vec!["male".to_string(), "solo".to_string()]
        );
    }

    #[test]
    fn test_remove_rejects_missing() {
        let (_dir, store) = store();
        assert!(matches!(
            store.remove_constant("g", "wolf"),
            Err(FinderError::TagMissing(_))
        ));
        assert!(!store.path_for("g").exists());
        store.remove_constant("g", "male").unwrap();
        assert!(store.constant_tags("g").unwrap().is_empty());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut settings = GroupSettings {
            rating: Rating::Safe,
            constant_tags: vec!["a".into(), "b".into(), "c".into()],
        };

        settings.replace_constant("b", "x").unwrap();
        assert_eq!(settings.constant_tags, vec!["a", "x", "c"]);
        assert!(matches!(
            settings.replace_constant("nope", "y"),
            Err(FinderError::TagMissing(_))
        ));
        assert!(matches!(
            settings.replace_constant("a", "c"),
            Err(FinderError::TagExists(_))
        ));
        assert_eq!(settings.constant_tags, vec!["a", "x", "c"]);
    }

    #[test]
    fn test_group_ids_are_sanitized() {
        let (_dir, store) = store();
        assert_eq!(store.path_for("").file_name().unwrap(), "private.json");
        assert_eq!(
            store.path_for("../etc/passwd").file_name().unwrap(),
            "%2E%2E%2Fetc%2Fpasswd.json"
        );
        assert_eq!(store.path_for("team.a").file_name().unwrap(), "team%2Ea.json");
    }

    #[test]
    fn test_group_ids_do_not_collide() {
        let (_dir, store) = store();

        for (a, b) in [("team.a", "team_a"), ("群1", "组1"), ("!abc:srv", "_abc_srv"), ("a%2E", "a.")] {
            assert_ne!(store.path_for(a), store.path_for(b), "{a} and {b} share a file");
        }

        store.set_rating("team.a", Rating::Explicit).unwrap();
        store.set_rating("群1", Rating::Questionable).unwrap();

        assert_eq!(store.rating("team.a").unwrap(), Rating::Explicit);
        assert_eq!(store.rating("team_a").unwrap(), Rating::Safe);
        assert_eq!(store.rating("群1").unwrap(), Rating::Questionable);
        assert_eq!(store.rating("组1").unwrap(), Rating::Safe);
    }
}
