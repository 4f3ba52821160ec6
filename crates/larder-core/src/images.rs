//! Deterministic illustrative images.
//!
//! An image is derived only from a recipe's id, name and ingredients, so the
//! same recipe gets the same picture on every load without network calls or
//! randomness.

use crate::types::RecipeId;

const UNSPLASH: &str = "https://images.unsplash.com/";
const SIZING: &str = "?w=600&h=400&fit=crop&crop=center";

/// Dish names checked against the recipe name before any category.
const EXACT_DISHES: &[(&str, &str)] = &[
    ("spaghetti carbonara", "photo-1551183053-bf91a1d81141"),
    ("chicken alfredo", "photo-1572441713132-51c75654db73"),
    ("margherita pizza", "photo-1565299624946-b28f40a0ca4b"),
    ("caesar salad", "photo-1540420773420-3366772f4999"),
    ("grilled salmon", "photo-1544943910-4c1dc44aab44"),
    ("beef steak", "photo-1546833999-b9f581a1996d"),
    ("chocolate cake", "photo-1551024506-0bccd828d307"),
    ("fried rice", "photo-1563379091339-03246963d96c"),
    ("tomato soup", "photo-1547592180-85f173990554"),
    ("pancakes", "photo-1551782450-a2132b4ba21d"),
    ("hamburger", "photo-1558030006-450675393462"),
    ("sushi", "photo-1579952363873-27d3bfad9c0d"),
    ("lasagna", "photo-1551892374-ecf8754cf8b0"),
    ("ramen", "photo-1569718212165-3a8278d5f624"),
    ("fish and chips", "photo-1565680018434-b513d5e5fd47"),
    ("greek salad", "photo-1546793665-c74683f339c1"),
    ("fried chicken", "photo-1562967914-608f82629710"),
    ("ice cream", "photo-1551024601-bec78aea704b"),
    ("cheesecake", "photo-1563729784474-d77dbb933a9e"),
    ("paella", "photo-1565299507177-b0ac66763828"),
];

pub struct ImageCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub images: &'static [&'static str],
}

/// Categories in priority order: the first one with a keyword hit wins.
pub const CATEGORIES: &[ImageCategory] = &[
    ImageCategory {
        name: "pizza",
        keywords: &["pizza", "margherita", "pepperoni"],
        images: &[
            "photo-1565299624946-b28f40a0ca4b",
            "photo-1513104890138-7c749659a591",
            "photo-1571407970349-bc81e7e96d47",
            "photo-1574071318508-1cdbab80d002",
        ],
    },
    ImageCategory {
        name: "pasta",
        keywords: &["pasta", "spaghetti", "linguine", "fettuccine", "penne", "macaroni", "carbonara", "bolognese", "alfredo", "lasagna"],
        images: &[
            "photo-1551183053-bf91a1d81141",
            "photo-1621996346565-e3dbc353d2e5",
            "photo-1563379091339-03246963d96c",
            "photo-1572441713132-51c75654db73",
            "photo-1551892374-ecf8754cf8b0",
        ],
    },
    ImageCategory {
        name: "chicken",
        keywords: &["chicken", "poultry", "grilled chicken", "fried chicken", "chicken breast", "wings", "drumstick"],
        images: &[
            "photo-1598103442097-8b74394b95c6",
            "photo-1532550907401-a500c9a57435",
            "photo-1604503468506-a8da13d82791",
            "photo-1562967914-608f82629710",
            "photo-1527477396000-e27163b481c2",
        ],
    },
    ImageCategory {
        name: "beef",
        keywords: &["beef", "steak", "burger", "ground beef", "ribeye", "sirloin", "filet", "meatball", "roast beef"],
        images: &[
            "photo-1546833999-b9f581a1996d",
            "photo-1558030006-450675393462",
            "photo-1544025162-d76694265947",
            "photo-1551218808-94e220e084d2",
            "photo-1529692236671-f1f6cf9683ba",
        ],
    },
    ImageCategory {
        name: "seafood",
        keywords: &["fish", "salmon", "tuna", "shrimp", "seafood", "crab", "lobster", "cod", "tilapia", "prawns"],
        images: &[
            "photo-1544943910-4c1dc44aab44",
            "photo-1559847844-5315695dadae",
            "photo-1565680018434-b513d5e5fd47",
            "photo-1571019613454-1cb2f99b2d8b",
            "photo-1559847844-d724ce1b2b5e",
        ],
    },
    ImageCategory {
        name: "rice",
        keywords: &["rice", "risotto", "fried rice", "pilaf", "biryani", "paella", "sushi"],
        images: &[
            "photo-1563379091339-03246963d96c",
            "photo-1571019613454-1cb2f99b2d8b",
            "photo-1579952363873-27d3bfad9c0d",
            "photo-1565299507177-b0ac66763828",
            "photo-1596797038530-2c107229654b",
        ],
    },
    ImageCategory {
        name: "sandwich",
        keywords: &["sandwich", "wrap", "sub", "panini", "club", "blt", "grilled cheese", "burrito", "quesadilla"],
        images: &[
            "photo-1539252554453-80ab65ce3586",
            "photo-1565299624946-b28f40a0ca4b",
            "photo-1551218808-94e220e084d2",
            "photo-1565299507177-b0ac66763828",
            "photo-1551218808-94e220e084d2",
        ],
    },
    ImageCategory {
        name: "soup",
        keywords: &["soup", "broth", "bisque", "chowder", "stew", "ramen", "pho", "minestrone", "tomato soup"],
        images: &[
            "photo-1547592180-85f173990554",
            "photo-1476718406336-bb5a9690ee2a",
            "photo-1574484284002-952d92456975",
            "photo-1569718212165-3a8278d5f624",
            "photo-1547592166-23ac45744acd",
        ],
    },
    ImageCategory {
        name: "salad",
        keywords: &["salad", "greens", "lettuce", "spinach", "caesar", "greek", "cobb", "caprese"],
        images: &[
            "photo-1540420773420-3366772f4999",
            "photo-1512621776951-a57141f2eefd",
            "photo-1546793665-c74683f339c1",
            "photo-1505576391880-b3f9d713dc4f",
            "photo-1571068316344-75bc76f77890",
        ],
    },
    ImageCategory {
        name: "breakfast",
        keywords: &["breakfast", "pancake", "waffle", "toast", "cereal", "oatmeal", "eggs", "bacon", "omelet", "french toast"],
        images: &[
            "photo-1551782450-a2132b4ba21d",
            "photo-1484723091739-30a097e8f929",
            "photo-1506084868230-bb9d95c24759",
            "photo-1525351484163-7529414344d8",
            "photo-1551218808-94e220e084d2",
        ],
    },
    ImageCategory {
        name: "dessert",
        keywords: &["cake", "cookie", "pie", "dessert", "sweet", "chocolate", "ice cream", "pudding", "brownie", "cheesecake", "tiramisu"],
        images: &[
            "photo-1551024506-0bccd828d307",
            "photo-1578985545062-69928b1d9587",
            "photo-1563729784474-d77dbb933a9e",
            "photo-1551024601-bec78aea704b",
            "photo-1571115764595-644a1f56a55c",
        ],
    },
    ImageCategory {
        name: "vegetarian",
        keywords: &["vegetarian", "vegan", "tofu", "quinoa", "lentil", "bean", "veggie", "plant-based"],
        images: &[
            "photo-1512621776951-a57141f2eefd",
            "photo-1540420773420-3366772f4999",
            "photo-1571068316344-75bc76f77890",
            "photo-1505576391880-b3f9d713dc4f",
            "photo-1546793665-c74683f339c1",
        ],
    },
];

const DEFAULT_IMAGES: &[&str] = &[
    "photo-1546069901-ba9599a7e63c",
    "photo-1504674900247-0877df9cc836",
    "photo-1555939594-58d7cb561ad1",
    "photo-1565299624946-b28f40a0ca4b",
    "photo-1551218808-94e220e084d2",
];

/// Which rule produced an image; useful for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Dish(&'static str),
    Category(&'static str),
    Default,
}

/// Pick the image for a recipe. `name` and `ingredients` may be in any case.
pub fn assign_image<S: AsRef<str>>(id: RecipeId, name: &str, ingredients: &[S]) -> (String, ImageSource) {
    let name = name.to_lowercase();
    let ingredients: Vec<String> = ingredients.iter().map(|i| i.as_ref().to_lowercase()).collect();

    if let Some((dish, photo)) = EXACT_DISHES.iter().find(|(dish, _)| name.contains(dish)) {
        return (image_url(photo), ImageSource::Dish(*dish));
    }

    let mentions = |keyword: &str| name.contains(keyword) || ingredients.iter().any(|i| i.contains(keyword));
    for category in CATEGORIES {
        if category.keywords.iter().any(|k| mentions(*k)) {
            return (image_url(pick(category.images, id)), ImageSource::Category(category.name));
        }
    }

    (image_url(pick(DEFAULT_IMAGES, id)), ImageSource::Default)
}

fn pick(images: &'static [&'static str], id: RecipeId) -> &'static str {
    // Tables are non-empty constants, so the modulus is never zero.
    let index = (id % images.len() as u64) as usize;
    images[index]
}

fn image_url(photo: &str) -> String { format!("{UNSPLASH}{photo}{SIZING}") }
