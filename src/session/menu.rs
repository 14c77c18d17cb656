use crate::game::Coordinate;

/// Buttons on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuButton {
    Play,
    Exit,
}

/// Inclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRect {
    pub top_left: Coordinate,
    pub bottom_right: Coordinate,
}

impl ButtonRect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            top_left: Coordinate { x: x0, y: y0 },
            bottom_right: Coordinate { x: x1, y: y1 },
        }
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        (self.top_left.x..=self.bottom_right.x).contains(&at.x)
            && (self.top_left.y..=self.bottom_right.y).contains(&at.y)
    }
}

/// Where the menu buttons sit on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLayout {
    pub play: ButtonRect,
    pub exit: ButtonRect,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            play: ButtonRect::new(340, 190, 450, 250),
            exit: ButtonRect::new(340, 290, 450, 350),
        }
    }
}

impl MenuLayout {
    /// Button under the cursor, if any
    pub fn hit(&self, at: Coordinate) -> Option<MenuButton> {
        if self.play.contains(at) {
            Some(MenuButton::Play)
        } else if self.exit.contains(at) {
            Some(MenuButton::Exit)
        } else {
            None
        }
    }

    pub fn rect(&self, button: MenuButton) -> ButtonRect {
        match button {
            MenuButton::Play => self.play,
            MenuButton::Exit => self.exit,
        }
    }
}
