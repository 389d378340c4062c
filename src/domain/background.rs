//! Static catalog of card backgrounds

/// One selectable background image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundChoice {
    pub id: &'static str,
    pub name: &'static str,
    /// Image path relative to the asset directory
    pub image: &'static str,
}

/// Every background offered by the selector, in display order
pub const BACKGROUNDS: &[BackgroundChoice] = &[
    BackgroundChoice {
        id: "1",
        name: "Background 1",
        image: "images/image1.png",
    },
    BackgroundChoice {
        id: "2",
        name: "Background 2",
        image: "images/image2.png",
    },
];

/// Look up a catalog entry by id
pub fn find_background(id: &str) -> Option<&'static BackgroundChoice> {
    BACKGROUNDS.iter().find(|choice| choice.id == id)
}

/// Position of the entry whose image reference matches, used to restore dropdown state
pub fn background_index(image: &str) -> Option<usize> {
    BACKGROUNDS.iter().position(|choice| choice.image == image)
}
