//! Built-in exercise catalogue for the exercise screen.

use bourbon_core::{Exercise, Quantity};

fn exercise(id: u32, name: &str, description: &str, duration_secs: Option<u32>, reps: Option<u32>) -> Exercise {
    Exercise {
        id,
        name: name.to_owned(),
        description: description.to_owned(),
        duration_secs,
        quantity: reps.map(|amount| Quantity { amount, unit: "reps".to_owned() }),
    }
}

/// Exercises shown on the deck. The last entry is the top card.
pub fn exercises() -> Vec<Exercise> {
    vec![
        exercise(1, "Plank", "Forearms down, body in one straight line.", Some(60), None),
        exercise(2, "Lunge", "Step forward, lower the back knee, push back up.", None, Some(10)),
        exercise(3, "Push-up", "Hands under shoulders, chest to the floor.", Some(45), Some(12)),
        exercise(4, "Squat", "Feet shoulder-width apart, hips back, chest up.", None, Some(15)),
    ]
}
