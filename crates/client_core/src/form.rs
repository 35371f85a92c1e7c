//! Form field values and the notification area of the create-recipe page.

use shared::domain::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Ingredients,
    Instructions,
    CookingTime,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Ingredients,
        FormField::Instructions,
        FormField::CookingTime,
        FormField::Category,
    ];

    /// Element id of the input backing this field.
    pub fn element_id(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Ingredients => "ingredients",
            FormField::Instructions => "instructions",
            FormField::CookingTime => "cookingTime",
            FormField::Category => "category",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.element_id() == id)
    }
}

/// Raw text of every input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    title: String,
    ingredients: String,
    instructions: String,
    cooking_time: String,
    category: String,
}

impl RecipeForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Ingredients => &self.ingredients,
            FormField::Instructions => &self.instructions,
            FormField::CookingTime => &self.cooking_time,
            FormField::Category => &self.category,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Ingredients => &mut self.ingredients,
            FormField::Instructions => &mut self.instructions,
            FormField::CookingTime => &mut self.cooking_time,
            FormField::Category => &mut self.category,
        };
        *slot = value.into();
    }

    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn to_recipe(&self) -> Recipe {
        Recipe::from_form_values(
            &self.title,
            &self.ingredients,
            &self.instructions,
            &self.cooking_time,
            &self.category,
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "message success",
            NotificationKind::Error => "message error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    text: String,
    kind: Option<NotificationKind>,
    visible: bool,
}

impl Notification {
    pub fn show(&mut self, kind: NotificationKind, text: impl Into<String>) {
        self.text = text.into();
        self.kind = Some(kind);
        self.visible = true;
    }

    /// Hides the element. Text and class stay, as with `display: none`.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> Option<NotificationKind> {
        self.kind
    }

    pub fn css_class(&self) -> Option<&'static str> {
        self.kind.map(NotificationKind::css_class)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Everything the submit handler reads and writes on the page.
#[derive(Debug, Clone, Default)]
pub struct FormPage {
    pub form: RecipeForm,
    pub notification: Notification,
}

#[cfg(test)]
mod tests {
    use shared::domain::CookingTime;

    use super::*;

    #[test]
    fn element_ids_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_element_id(field.element_id()), Some(field));
        }
        assert_eq!(FormField::from_element_id("cookingTime"), Some(FormField::CookingTime));
        assert_eq!(FormField::from_element_id("notification"), None);
    }

    #[test]
    fn to_recipe_reads_current_values() {
        let form = RecipeForm::default()
            .with(FormField::Title, "Pancakes")
            .with(FormField::Ingredients, "flour, milk,  eggs")
            .with(FormField::Instructions, "Mix and fry")
            .with(FormField::CookingTime, "20")
            .with(FormField::Category, "Breakfast");

        let recipe = form.to_recipe();
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.ingredients, vec!["flour", "milk", "eggs"]);
        assert_eq!(recipe.instructions, "Mix and fry");
        assert_eq!(recipe.cooking_time, CookingTime::Minutes(20));
        assert_eq!(recipe.category, "Breakfast");
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = RecipeForm::default()
            .with(FormField::Title, "x")
            .with(FormField::Category, "y");
        assert!(!form.is_blank());
        form.reset();
        assert!(form.is_blank());
    }

    #[test]
    fn hide_keeps_text_and_class() {
        let mut notification = Notification::default();
        assert_eq!(notification.css_class(), None);

        notification.show(NotificationKind::Error, "boom");
        assert!(notification.is_visible());
        assert_eq!(notification.css_class(), Some("message error"));

        notification.hide();
        assert!(!notification.is_visible());
        assert_eq!(notification.text(), "boom");
    }
}
