/// Menu commands of the cat store
///
/// Same shape as the task tracker's catalog: [`COMMANDS`] holds one entry per
/// menu number with its prompts and handler, and [`CatCatalog`] collects the
/// parameters and runs the handler against any [`CatStore`]. Integer prompts
/// repeat until the answer parses, so no command ever runs with a malformed
/// age.
use crate::error::{StoreError, StoreResult};
use crate::models::cat::Cat;
use crate::store::CatStore;
use async_trait::async_trait;
use dbdesk_shared::{Console, Dispatch, InvalidInputPolicy, Param, Params};
use futures::future::BoxFuture;
use std::io::{BufRead, Write};
use tracing::debug;

/// Runs one command and returns the text to print
pub type Handler = for<'s> fn(&'s dyn CatStore, Params) -> BoxFuture<'s, StoreResult<String>>;

/// One menu entry
pub struct CatCommand {
    pub label: &'static str,

    /// Parameters prompted for, in order
    pub params: &'static [Param],

    pub handler: Handler,
}

const NAME: Param = Param::text("name", "Enter the cat's name: ");

/// The menu, in menu order
pub static COMMANDS: [CatCommand; 7] = [
    CatCommand {
        label: "Add a new cat to the collection",
        params: &[
            NAME,
            Param::integer("age", "Enter the cat's age: "),
            Param::list(
                "features",
                "Enter the cat's features (use ';' to split multiple entries): ",
                ';',
            ),
        ],
        handler: create_cat,
    },
    CatCommand {
        label: "Display all entries from the collection",
        params: &[],
        handler: read_all_cats,
    },
    CatCommand {
        label: "Search a cat by name",
        params: &[NAME],
        handler: read_cat_by_name,
    },
    CatCommand {
        label: "Update the age of a specific cat",
        params: &[NAME, Param::integer("age", "Enter the cat's new age: ")],
        handler: update_cat_age,
    },
    CatCommand {
        label: "Add a new feature for a specific cat",
        params: &[NAME, Param::text("feature", "Enter the cat's new feature: ")],
        handler: add_feature_to_cat,
    },
    CatCommand {
        label: "Delete a cat by name",
        params: &[NAME],
        handler: delete_cat_by_name,
    },
    CatCommand {
        label: "Delete all cats from the collection",
        params: &[],
        handler: delete_all_cats,
    },
];

/// Drives [`COMMANDS`] against a store
pub struct CatCatalog<S> {
    store: S,
}

impl<S: CatStore> CatCatalog<S> {
    pub fn new(store: S) -> Self {
        CatCatalog { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: CatStore> Dispatch for CatCatalog<S> {
    type Error = StoreError;

    fn labels(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|command| command.label).collect()
    }

    async fn dispatch<R, W>(
        &mut self,
        index: usize,
        console: &mut Console<R, W>,
    ) -> Result<(), Self::Error>
    where
        R: BufRead + Send,
        W: Write + Send,
    {
        let command = &COMMANDS[index];
        let params = console.collect(command.params, InvalidInputPolicy::Reprompt)?;
        debug!(label = command.label, params = params.len(), "Parameters collected");

        let reply = (command.handler)(&self.store, params).await?;
        console.say(reply)?;
        Ok(())
    }
}

fn not_found(name: &str) -> String {
    format!("No cat found with name {}", name)
}

fn create_cat(store: &dyn CatStore, params: Params) -> BoxFuture<'_, StoreResult<String>> {
    Box::pin(async move {
        let cat = Cat::new(params.text(0)?, params.int(1)?, params.list(2)?.to_vec());
        let id = store.insert(cat).await?;
        Ok(format!("Cat inserted with id: {}", id))
    })
}

fn read_all_cats(store: &dyn CatStore, _params: Params) -> BoxFuture<'_, StoreResult<String>> {
    Box::pin(async move {
        let cats = store.find_all().await?;
        if cats.is_empty() {
            return Ok(format!(
                "The collection {} has no records",
                store.collection_name()
            ));
        }

        let lines: Vec<String> = cats.iter().map(Cat::to_string).collect();
        Ok(lines.join("\n"))
    })
}

fn read_cat_by_name(store: &dyn CatStore, params: Params) -> BoxFuture<'_, StoreResult<String>> {
    Box::pin(async move {
        let name = params.text(0)?;
        Ok(match store.find_by_name(name).await? {
            Some(cat) => cat.to_string(),
            None => not_found(name),
        })
    })
}

fn update_cat_age(store: &dyn CatStore, params: Params) -> BoxFuture<'_, StoreResult<String>> {
    Box::pin(async move {
        let name = params.text(0)?;
        let age = params.int(1)?;
        if store.update_age(name, age).await? == 0 {
            return Ok(not_found(name));
        }
        Ok(format!("Updated age of {} to {}", name, age))
    })
}

fn add_feature_to_cat(
    store: &dyn CatStore,
    params: Params,
) -> BoxFuture<'_, StoreResult<String>> {
    Box::pin(async move {
        let name = params.text(0)?;
        let feature = params.text(1)?;
        if store.add_feature(name, feature).await? == 0 {
            return Ok(not_found(name));
        }
        Ok(format!("Added feature '{}' to {}", feature, name))
    })
}

fn delete_cat_by_name(
    store: &dyn CatStore,
    params: Params,
) -> BoxFuture<'_, StoreResult<String>> {
    Box::pin(async move {
        let name = params.text(0)?;
        if store.delete_by_name(name).await? == 0 {
            return Ok(not_found(name));
        }
        Ok(format!("Deleted cat with name {}", name))
    })
}

fn delete_all_cats(store: &dyn CatStore, _params: Params) -> BoxFuture<'_, StoreResult<String>> {
    Box::pin(async move {
        let deleted = store.delete_all().await?;
        Ok(format!("Deleted {} cats", deleted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbdesk_shared::ParamKind;

    #[test]
    fn test_catalog_has_seven_entries_in_menu_order() {
        assert_eq!(COMMANDS.len(), 7);
        assert_eq!(COMMANDS[0].label, "Add a new cat to the collection");
        assert_eq!(COMMANDS[6].label, "Delete all cats from the collection");
    }

    #[test]
    fn test_age_parameters_are_integers() {
        let ages: Vec<ParamKind> = COMMANDS
            .iter()
            .flat_map(|command| command.params.iter())
            .filter(|param| param.name == "age")
            .map(|param| param.kind)
            .collect();
        assert_eq!(ages, [ParamKind::Integer, ParamKind::Integer]);
    }

    #[test]
    fn test_features_split_on_semicolon() {
        assert_eq!(
            COMMANDS[0].params[2].kind,
            ParamKind::List { delimiter: ';' }
        );
    }
}
