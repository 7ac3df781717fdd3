use std::fmt;

/// Положение пользователя в диалоге. В хранилище лежит текстовой меткой,
/// чтобы записи было видно глазами в базе.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationState {
    DisplayMainMenu,
    HandleMainMenu,
    DisplayDescription,
    HandleDescription,
    DisplayCart,
    HandleCart,
    RequestCustomerInfo,
    HandleCustomerInfo,
}

impl ConversationState {
    /// Метка для записи в хранилище
    pub fn label(self) -> &'static str {
        match self {
            ConversationState::DisplayMainMenu => "DISPLAY_MAIN_MENU",
            ConversationState::HandleMainMenu => "HANDLE_MAIN_MENU",
            ConversationState::DisplayDescription => "DISPLAY_DESCRIPTION",
            ConversationState::HandleDescription => "HANDLE_DESCRIPTION",
            ConversationState::DisplayCart => "DISPLAY_CART",
            ConversationState::HandleCart => "HANDLE_CART",
            ConversationState::RequestCustomerInfo => "REQUEST_CUSTOMER_INFO",
            ConversationState::HandleCustomerInfo => "HANDLE_CUSTOMER_INFO",
        }
    }

    /// Разбор метки из хранилища. None значит, что в базе лежит мусор.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "DISPLAY_MAIN_MENU" => Some(ConversationState::DisplayMainMenu),
            "HANDLE_MAIN_MENU" => Some(ConversationState::HandleMainMenu),
            "DISPLAY_DESCRIPTION" => Some(ConversationState::DisplayDescription),
            "HANDLE_DESCRIPTION" => Some(ConversationState::HandleDescription),
            "DISPLAY_CART" => Some(ConversationState::DisplayCart),
            "HANDLE_CART" => Some(ConversationState::HandleCart),
            "REQUEST_CUSTOMER_INFO" => Some(ConversationState::RequestCustomerInfo),
            "HANDLE_CUSTOMER_INFO" => Some(ConversationState::HandleCustomerInfo),
            _ => None,
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
