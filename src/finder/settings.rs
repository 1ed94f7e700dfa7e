//! group settings commands: rating and constant tags
use {
    super::{ConstantsAction, Finder, RatingAction},
    crate::{
        error::Result,
        host::ChatHost,
        rating::{Rating, compose_rating_map},
    },
    tracing::info,
};

impl Finder {
    /// `rating list | set | look | clear`
    pub async fn rating(&self, host: &dyn ChatHost, group: &str, action: RatingAction) -> Result<()> {
        let reply = match action {
            RatingAction::List => format!("{}\n\nall: no rating restriction", compose_rating_map(",\n")),
            RatingAction::Set { rating } => {
                let rating: Rating = rating.parse()?;
                self.store.set_rating(group, rating)?;
                info!(group, %rating, "rating changed");
                rating_changed(rating)
            }
            RatingAction::Look => match self.store.rating(group)?.label() {
                Some(label) => format!("current rating: {label}"),
                None => "there is no rating restriction".to_string(),
            },
            RatingAction::Clear => {
                self.store.set_rating(group, Rating::Unrestricted)?;
                info!(group, "rating cleared");
                rating_changed(Rating::Unrestricted)
            }
        };

        self.say(host, group, reply).await
    }

    /// `constants add | delete | replace | get`
    pub async fn constants(&self, host: &dyn ChatHost, group: &str, action: ConstantsAction) -> Result<()> {
        let reply = match action {
            ConstantsAction::Add { tag } => {
                self.store.add_constant(group, &tag)?;
                format!("constant tag added: {tag}")
            }
            ConstantsAction::Delete { tag } => {
                self.store.remove_constant(group, &tag)?;
                format!("constant tag deleted: {tag}")
            }
            ConstantsAction::Replace { old_tag, new_tag } => {
                self.store.replace_constant(group, &old_tag, &new_tag)?;
                format!("replaced: {old_tag} -> {new_tag}")
            }
            ConstantsAction::Get => {
                let tags = self.store.constant_tags(group)?;
                if tags.is_empty() {
                    "there are no constant tags".to_string()
                } else {
                    tags.join(self.composer.separator())
                }
            }
        };

        self.say(host, group, reply).await
    }
}

/// the reply after a rating change
fn rating_changed(rating: Rating) -> String {
    match rating.label() {
        Some(label) => format!("rating set to: {label}"),
        None => "rating restriction removed".to_string(),
    }
}
