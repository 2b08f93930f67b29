// ABOUTME: Fixed recipe system prompt and deterministic user prompt construction
// ABOUTME: Appends one clause per set preference after the comma-joined ingredient list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors

//! # Recipe Prompts
//!
//! Prompt construction is deterministic: the same ingredients and
//! preferences always produce the same request text, which keeps generation
//! behavior reproducible across backends and retries.

use crate::preferences::PreferenceSelection;

/// System instruction describing the recipe assistant's role and output format
pub const RECIPE_SYSTEM_PROMPT: &str = "\
You are a helpful recipe assistant. A user will give you a list of available ingredients, \
and you will suggest a recipe they can make using some or most of them. You may include a \
few reasonable additional ingredients as needed.

**Instructions:**
- Format your output in **Markdown**.
- Include a bolded recipe title, a list of ingredients, and clear preparation steps.
- Emphasize the **main dish** name by making it bold and using a heading.
- If user provides preferences (e.g., cuisine, meal type, or dietary restrictions), incorporate them intelligently.
- Keep your tone friendly and enthusiastic, like you're excited to help cook!";

/// Build the user prompt from ingredients and resolved preferences
///
/// The meal type is lower-cased so it reads naturally inside the sentence.
#[must_use]
pub fn build_user_prompt(ingredients: &[String], preferences: &PreferenceSelection) -> String {
    let mut prompt = format!(
        "I have the following ingredients: {}.\n",
        ingredients.join(", ")
    );

    if let Some(cuisine) = &preferences.cuisine {
        prompt.push_str(&format!("My preferred cuisine is {cuisine}.\n"));
    }

    if let Some(meal_type) = &preferences.meal_type {
        prompt.push_str(&format!(
            "I'm looking for a {} recipe.\n",
            meal_type.to_lowercase()
        ));
    }

    if let Some(restrictions) = &preferences.dietary_restrictions {
        prompt.push_str(&format!(
            "Please consider these dietary restrictions: {restrictions}.\n"
        ));
    }

    prompt.push_str(
        "What recipe can I make? Format the answer in markdown with a bold title, \
         ingredients list, and numbered steps.",
    );
    prompt
}
