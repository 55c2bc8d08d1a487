use std::fs;
use std::path::Path;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;

    // A small playable room showing every content feature.
    let room_content = r#"{
  "id": "abandoned-mansion",
  "name": "Abandoned Mansion",
  "description": "Dust sheets drape the furniture. The front door locked itself behind you.",
  "difficulty": "medium",
  "objects": [
    {
      "id": "ancient-key",
      "name": "Ancient Key",
      "description": "A tarnished bronze key lying on the mantelpiece.",
      "category": "key",
      "is_collectible": true
    },
    {
      "id": "mysterious-box",
      "name": "Mysterious Box",
      "description": "A carved box with a bronze lock.",
      "category": "container",
      "is_collectible": true,
      "combines_with": ["ancient-key"]
    },
    {
      "id": "portrait",
      "name": "Portrait",
      "description": "A stern ancestor. The year 1887 is painted under the signature.",
      "category": "scenery"
    }
  ],
  "puzzles": [
    {
      "id": "front-door",
      "name": "Front Door",
      "prompt": "A four-digit combination lock seals the front door.",
      "solution": { "type": "code", "value": "1887" },
      "required_objects": ["portrait"],
      "hints": [
        "Someone in this house never changed the combination.",
        "Look closely at the portrait."
      ],
      "reward_text": "The front door swings open."
    }
  ]
}
"#;

    fs::write(dir.join("abandoned-mansion.json"), room_content)
        .map_err(|e| format!("cannot write abandoned-mansion.json: {e}"))?;

    println!("Created game '{name}' in {name}/");
    println!("  abandoned-mansion.json  — a template room to edit or play");
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  esc rooms                      # List rooms and their status");
    println!("  esc show abandoned-mansion     # Inspect the room");
    println!("  esc play abandoned-mansion     # Play it");

    Ok(())
}
