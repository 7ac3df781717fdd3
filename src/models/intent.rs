use super::ConversationState;

/// Смысл нажатой inline-кнопки. Кодируется в callback-данные при сборке
/// клавиатуры и разбирается обратно, когда нажатие прилетает в обработчик.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonIntent {
    /// Показать корзину
    Cart,
    /// Вернуться к списку товаров
    MainMenu,
    /// Перейти к вводу почты
    Checkout,
    /// Открыть карточку товара
    SelectProduct(String),
    /// Положить товар в корзину
    AddToCart { product_id: String, quantity: u32 },
    /// Убрать позицию из корзины
    RemoveCartItem(String),
}

impl ButtonIntent {
    /// Callback-данные для кнопки с этим намерением
    pub fn payload(&self) -> String {
        match self {
            ButtonIntent::Cart => "cart".to_string(),
            ButtonIntent::MainMenu => "main_menu".to_string(),
            ButtonIntent::Checkout => "customer_info".to_string(),
            ButtonIntent::SelectProduct(product_id) => product_id.clone(),
            ButtonIntent::AddToCart {
                product_id,
                quantity,
            } => format!("{} {}", quantity, product_id),
            ButtonIntent::RemoveCartItem(item_id) => item_id.clone(),
        }
    }

    /// Разбор callback-данных. Служебные метки и пара "количество товар"
    /// значат одно и то же везде, а вот голый идентификатор зависит от
    /// состояния: в корзине это её позиция, в остальных экранах товар.
    pub fn parse(payload: &str, state: ConversationState) -> ButtonIntent {
        match payload {
            "cart" => ButtonIntent::Cart,
            "main_menu" => ButtonIntent::MainMenu,
            "customer_info" => ButtonIntent::Checkout,
            other => {
                if let Some((quantity, product_id)) = other.split_once(' ') {
                    if let Ok(quantity) = quantity.parse::<u32>() {
                        return ButtonIntent::AddToCart {
                            product_id: product_id.to_string(),
                            quantity,
                        };
                    }
                }

                if state == ConversationState::HandleCart {
                    ButtonIntent::RemoveCartItem(other.to_string())
                } else {
                    ButtonIntent::SelectProduct(other.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_labels_parse_in_any_state() {
        for state in [
            ConversationState::HandleMainMenu,
            ConversationState::HandleDescription,
            ConversationState::HandleCart,
        ] {
            assert_eq!(ButtonIntent::parse("cart", state), ButtonIntent::Cart);
            assert_eq!(ButtonIntent::parse("main_menu", state), ButtonIntent::MainMenu);
            assert_eq!(
                ButtonIntent::parse("customer_info", state),
                ButtonIntent::Checkout
            );
        }
    }

    #[test]
    fn quantity_pair_parses_as_add_to_cart() {
        assert_eq!(
            ButtonIntent::parse("5 PROD-1", ConversationState::HandleDescription),
            ButtonIntent::AddToCart {
                product_id: "PROD-1".to_string(),
                quantity: 5,
            }
        );
    }

    #[test]
    fn quantity_pair_splits_on_first_space_only() {
        assert_eq!(
            ButtonIntent::parse("10 PROD 1", ConversationState::HandleDescription),
            ButtonIntent::AddToCart {
                product_id: "PROD 1".to_string(),
                quantity: 10,
            }
        );
    }

    #[test]
    fn non_numeric_prefix_keeps_whole_payload_as_id() {
        assert_eq!(
            ButtonIntent::parse("x PROD-1", ConversationState::HandleMainMenu),
            ButtonIntent::SelectProduct("x PROD-1".to_string())
        );
    }

    #[test]
    fn bare_id_depends_on_state() {
        assert_eq!(
            ButtonIntent::parse("PROD-1", ConversationState::HandleMainMenu),
            ButtonIntent::SelectProduct("PROD-1".to_string())
        );
        assert_eq!(
            ButtonIntent::parse("ITEM-9", ConversationState::HandleCart),
            ButtonIntent::RemoveCartItem("ITEM-9".to_string())
        );
    }

    #[test]
    fn payload_round_trips_through_parse() {
        let add = ButtonIntent::AddToCart {
            product_id: "PROD-1".to_string(),
            quantity: 10,
        };
        assert_eq!(
            ButtonIntent::parse(&add.payload(), ConversationState::HandleDescription),
            add
        );

        let remove = ButtonIntent::RemoveCartItem("ITEM-9".to_string());
        assert_eq!(
            ButtonIntent::parse(&remove.payload(), ConversationState::HandleCart),
            remove
        );
    }
}
