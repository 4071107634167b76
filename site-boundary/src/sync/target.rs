//! Cibles de rendu du synchroniseur : champ caché et conteneur de lignes

use super::rows::{render_rows_html, CoordinateInput};

/// Champ de formulaire qui porte le contour sérialisé
pub trait FormField {
    fn set_value(&mut self, value: &str);
}

/// Conteneur d'affichage des coordonnées
///
/// Chaque appel remplace entièrement le contenu précédent.
pub trait RowDisplay {
    fn replace_rows(&mut self, inputs: &[CoordinateInput]);

    fn clear_rows(&mut self) {
        self.replace_rows(&[]);
    }
}

/// Champ caché en mémoire
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenField {
    /// Nom du champ dans le formulaire
    pub name: String,
    value: String,
}

impl HiddenField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FormField for HiddenField {
    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

/// Liste de lignes en mémoire, avec son rendu HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowList {
    inputs: Vec<CoordinateInput>,
    html: String,
}

impl RowList {
    pub fn inputs(&self) -> &[CoordinateInput] {
        &self.inputs
    }

    /// Nombre de champs affichés (2 par sommet)
    pub fn row_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn inner_html(&self) -> &str {
        &self.html
    }
}

impl RowDisplay for RowList {
    fn replace_rows(&mut self, inputs: &[CoordinateInput]) {
        self.inputs = inputs.to_vec();
        self.html = render_rows_html(inputs);
    }
}
