// Static book content served to the page
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub bio: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookContent {
    pub title: String,
    pub subtitle: String,
    pub cover: Option<String>,
    pub buy_link: String,
    pub excerpt: String,
    pub author: AuthorInfo,
}

impl Default for BookContent {
    fn default() -> Self {
        Self {
            title: "The Current's Edge".to_string(),
            subtitle: "A luminous, mythic YA novel where rivers hold memory and power flows through bloodlines.".to_string(),
            cover: None,
            buy_link: "#".to_string(),
            excerpt: "\"The river spoke in frequencies she couldn't name but somehow understood. \
Amara pressed her palms against the smooth stone of the riverbank, feeling \
the vibration travel up through her bones.\""
                .to_string(),
            author: AuthorInfo {
                name: "Musole Kambinda".to_string(),
                bio: "Writer. Explorer of environmental justice and cultural preservation. Telling stories where land, memory, and identity collide.".to_string(),
                photo: None,
            },
        }
    }
}
