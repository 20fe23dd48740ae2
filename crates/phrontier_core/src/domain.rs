//! crates/phrontier_core/src/domain.rs
//!
//! Defines the pure, core data structures for the catalog.
//! These structs are independent of any datastore or transport format.

use serde::{Deserialize, Serialize};

/// The closed set of resource kinds the catalog serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Simulation,
    Worksheet,
    Cheatsheet,
}

impl Default for ResourceType {
    fn default() -> Self {
        ResourceType::Simulation
    }
}

/// A single catalog entry: a simulation, worksheet, or cheat sheet.
///
/// Every field defaults on deserialization so that the store boundary, not
/// the serializer, decides which omissions are rejected. Wire names are
/// camelCase to match the JSON the clients already exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Opaque unique identifier. Assigned by the catalog at creation when
    /// the client leaves it empty; immutable afterwards.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(rename = "type", default)]
    pub kind: ResourceType,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user_guide: String,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
    /// Externally hosted embeddable URL for simulations, or an object-store
    /// URL for uploaded documents.
    #[serde(default)]
    pub content_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// ISO-8601, set once at creation, never mutated.
    #[serde(default)]
    pub created_at: String,
}

/// Role of a client session. Gates which actions a session offers; this is
/// not a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Student,
}

/// An ephemeral client identity. Lives only for the session, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

/// A browsing category with its sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub sub_categories: Vec<String>,
}

/// The canonical physics category catalog.
pub fn categories() -> Vec<Category> {
    fn cat(id: &str, name: &str, icon: &str, subs: &[&str]) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            sub_categories: subs.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        cat("mechanics", "Mechanics", "⚡", &["Kinematics", "Dynamics", "Rotation", "Gravitation"]),
        cat("thermo", "Thermodynamics", "🔥", &["Heat Transfer", "Laws of Thermodynamics", "Kinetic Theory"]),
        cat("waves", "Waves & Oscillations", "🌊", &["SHM", "Sound Waves", "Wave Motion"]),
        cat("electricity", "Electricity", "💡", &["Electrostatics", "Current Electricity", "Capacitance"]),
        cat("magnetism", "Magnetism", "🧲", &["Magnetic Effects", "EMI", "AC Currents"]),
        cat("optics", "Optics", "🔭", &["Ray Optics", "Wave Optics"]),
        cat("modern", "Modern Physics", "⚛️", &["Atoms", "Nuclei", "Dual Nature"]),
        cat(
            "astronomy",
            "Astronomy",
            "🪐",
            &["Indian Astronomy (Surya Siddhanta)", "Celestial Mechanics", "Observational Astronomy"],
        ),
    ]
}

/// Deterministic fallback image for records without a thumbnail.
///
/// Keyed on the category name so every consumer agrees on the same image.
/// Unknown categories share one default.
pub fn fallback_thumbnail(category: &str) -> String {
    match categories().iter().find(|c| c.name == category) {
        Some(c) => format!("/thumbnails/{}.png", c.id),
        None => "/thumbnails/default.png".to_string(),
    }
}

/// Starter records the store can be seeded with on first deployment.
pub fn seed_resources() -> Vec<Resource> {
    vec![
        Resource {
            id: "seed-projectile-motion".to_string(),
            title: "Projectile Motion Explorer".to_string(),
            category: "Mechanics".to_string(),
            sub_category: "Kinematics".to_string(),
            kind: ResourceType::Simulation,
            author: "Dr. Aryabhata".to_string(),
            description: "Explore trajectories with varying velocity and angles.".to_string(),
            user_guide: "Adjust the sliders to set velocity and launch angle. Click \"Fire\" to observe the path."
                .to_string(),
            learning_outcomes: vec![
                "Understand parabolic paths".to_string(),
                "Relate range to launch angle".to_string(),
            ],
            content_url: "https://phet.colorado.edu/sims/html/projectile-motion/latest/projectile-motion_en.html"
                .to_string(),
            thumbnail_url: None,
            created_at: "2024-05-01T00:00:00Z".to_string(),
        },
        Resource {
            id: "seed-surya-siddhanta".to_string(),
            title: "Surya Siddhanta: Planetary Models".to_string(),
            category: "Astronomy".to_string(),
            sub_category: "Indian Astronomy (Surya Siddhanta)".to_string(),
            kind: ResourceType::Simulation,
            author: "Astronomy Dept.".to_string(),
            description: "A visualization of the epicycle models from ancient Indian texts.".to_string(),
            user_guide: "Select a planet to see its Manda and Shighra epicycles.".to_string(),
            learning_outcomes: vec![
                "Understand Indian planetary models".to_string(),
                "Visualize epicycles".to_string(),
            ],
            content_url: "https://www.google.com/logos/2010/lunar_eclipse-hp.html".to_string(),
            thumbnail_url: None,
            created_at: "2024-05-02T00:00:00Z".to_string(),
        },
        Resource {
            id: "seed-ray-optics".to_string(),
            title: "Ray Optics Cheat Sheet".to_string(),
            category: "Optics".to_string(),
            sub_category: "Ray Optics".to_string(),
            kind: ResourceType::Cheatsheet,
            author: "Physics Phrontier Team".to_string(),
            description: "Concise summary of lens and mirror formulas.".to_string(),
            user_guide: "Download and keep handy for quick revision.".to_string(),
            learning_outcomes: vec![
                "Master lens formulas".to_string(),
                "Quick sign convention guide".to_string(),
            ],
            content_url: "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf".to_string(),
            thumbnail_url: None,
            created_at: "2024-05-03T00:00:00Z".to_string(),
        },
    ]
}
