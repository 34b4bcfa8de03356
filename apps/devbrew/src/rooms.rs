use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// A topic room. Rooms are a fixed in-process catalog, not a persisted
/// collection; messages reference them by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
}

fn room(id: &str, name: &str, slug: &str, description: &str) -> Room {
    Room {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
    }
}

static CATALOG: LazyLock<Vec<Room>> = LazyLock::new(|| {
    vec![
        room("1", "Java", "java", "The place for JVM enthusiasts."),
        room("2", "C / C++", "cpp", "Low-level systems and high-performance code."),
        room("3", "Python", "python", "Simplicity, Zen, and Data Science."),
        room("4", "AI / ML", "ai-ml", "Transformers, Neural Nets, and Tensors."),
        room("5", "Data Science", "data-science", "Cleaning data and building insights."),
        room("6", "LLMs", "llms", "Prompt engineering and large language models."),
        room("7", "Web Dev", "web-dev", "Modern frontend and backend frameworks."),
        room("8", "App Dev", "app-dev", "Mobile applications for iOS and Android."),
        room("9", "Cloud Computing", "cloud", "AWS, Azure, GCP and serverless."),
        room("10", "DevOps", "devops", "CI/CD, Kubernetes, and Automation."),
        room("11", "System Design", "sys-design", "Scalable architecture and distributed systems."),
        room("12", "DSA / CP", "dsa-cp", "Algorithms, data structures, and contests."),
        room("13", "Open Source", "open-source", "Contributing and maintaining public code."),
        room("14", "Cybersecurity", "cybersec", "Pentesting, security, and hacking."),
        room("15", "Game Dev", "game-dev", "Unity, Unreal, and Godot."),
        room("16", "Blockchain", "blockchain", "Web3, Smart Contracts, and Crypto."),
        room("17", "Embedded / IoT", "embedded", "Arduino, Raspberry Pi, and hardware."),
        room("18", "3D & Graphics", "graphics", "Shaders, WebGL, and rendering."),
        room("19", "UI/UX for Devs", "ui-ux", "Design principles for engineers."),
        room("20", "Compilers & Low Level", "compilers", "ASTs, IR, and Assembly."),
    ]
});

pub fn catalog() -> &'static [Room] {
    &CATALOG
}

pub fn by_slug(slug: &str) -> Option<&'static Room> {
    CATALOG.iter().find(|r| r.slug == slug)
}
