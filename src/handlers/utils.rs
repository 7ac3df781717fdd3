use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::models::ButtonIntent;
use crate::moltin::models::{Cart, CartItem, Product};

/// Главное меню: по кнопке на каждый товар и корзина внизу
pub fn main_menu_keyboard(products: &[Product]) -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = Vec::new();

    for product in products {
        keyboard.push(vec![InlineKeyboardButton::callback(
            product.name.clone(),
            ButtonIntent::SelectProduct(product.id.clone()).payload(),
        )]);
    }

    keyboard.push(vec![InlineKeyboardButton::callback(
        "Корзина",
        ButtonIntent::Cart.payload(),
    )]);

    InlineKeyboardMarkup::new(keyboard)
}

/// Клавиатура карточки товара: ряд количеств, корзина, назад
pub fn description_keyboard(product_id: &str) -> InlineKeyboardMarkup {
    let quantity_row: Vec<InlineKeyboardButton> = [1, 5, 10]
        .into_iter()
        .map(|quantity| {
            InlineKeyboardButton::callback(
                format!("{} шт", quantity),
                ButtonIntent::AddToCart {
                    product_id: product_id.to_string(),
                    quantity,
                }
                .payload(),
            )
        })
        .collect();

    InlineKeyboardMarkup::new(vec![
        quantity_row,
        vec![InlineKeyboardButton::callback(
            "Корзина",
            ButtonIntent::Cart.payload(),
        )],
        vec![InlineKeyboardButton::callback(
            "Назад",
            ButtonIntent::MainMenu.payload(),
        )],
    ])
}

/// Клавиатура корзины: убрать каждую позицию, оплата, назад в меню
pub fn cart_keyboard(items: &[CartItem]) -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = Vec::new();

    for item in items {
        keyboard.push(vec![InlineKeyboardButton::callback(
            format!("Убрать {}", item.name),
            ButtonIntent::RemoveCartItem(item.id.clone()).payload(),
        )]);
    }

    keyboard.push(vec![InlineKeyboardButton::callback(
        "Оплатить",
        ButtonIntent::Checkout.payload(),
    )]);
    keyboard.push(vec![InlineKeyboardButton::callback(
        "В меню",
        ButtonIntent::MainMenu.payload(),
    )]);

    InlineKeyboardMarkup::new(keyboard)
}

/// Подпись к фото товара
pub fn format_description(product: &Product) -> String {
    format!(
        "{}\n\n{} за штуку\n\n{} штук в наличии\n\n{}",
        product.name,
        product.meta.display_price.with_tax.formatted,
        product.meta.stock.level,
        product.description,
    )
}

/// Текст корзины: блок на каждую позицию и общая сумма
pub fn format_cart(cart: &Cart, items: &[CartItem]) -> String {
    let mut text = String::new();

    for item in items {
        text.push_str(&format!(
            "{}\n{}\n{} за штуку\n{} шт. в корзине за {}\n\n",
            item.name,
            item.description,
            item.meta.display_price.with_tax.unit.formatted,
            item.quantity,
            item.meta.display_price.with_tax.value.formatted,
        ));
    }

    text.push_str(&format!(
        "Всего: {}",
        cart.meta.display_price.with_tax.formatted
    ));

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moltin::models::{
        CartItemDisplayPrice, CartItemMeta, CartItemPrice, CartMeta, DisplayPrice, FormattedPrice,
        ImageRelationship, ProductMeta, ProductRelationships, ResourceRef, StockLevel,
    };

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: "Тонкий и мягкий".to_string(),
            meta: ProductMeta {
                display_price: DisplayPrice {
                    with_tax: FormattedPrice {
                        formatted: "150 руб.".to_string(),
                    },
                },
                stock: StockLevel { level: 24 },
            },
            relationships: ProductRelationships {
                main_image: ImageRelationship {
                    data: ResourceRef {
                        id: "FILE-1".to_string(),
                    },
                },
            },
        }
    }

    fn cart_item(id: &str, name: &str, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: name.to_string(),
            description: "Тонкий и мягкий".to_string(),
            quantity,
            meta: CartItemMeta {
                display_price: CartItemDisplayPrice {
                    with_tax: CartItemPrice {
                        unit: FormattedPrice {
                            formatted: "150 руб.".to_string(),
                        },
                        value: FormattedPrice {
                            formatted: "750 руб.".to_string(),
                        },
                    },
                },
            },
        }
    }

    fn button_payloads(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
        keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| match &button.kind {
                teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                other => panic!("unexpected button kind: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn main_menu_lists_products_then_cart() {
        let products = vec![product("PROD-1", "Лаваш"), product("PROD-2", "Пита")];
        let keyboard = main_menu_keyboard(&products);

        assert_eq!(button_payloads(&keyboard), vec!["PROD-1", "PROD-2", "cart"]);
    }

    #[test]
    fn description_keyboard_encodes_quantities() {
        let keyboard = description_keyboard("PROD-1");

        assert_eq!(
            button_payloads(&keyboard),
            vec!["1 PROD-1", "5 PROD-1", "10 PROD-1", "cart", "main_menu"]
        );
    }

    #[test]
    fn cart_keyboard_lists_items_then_actions() {
        let items = vec![cart_item("ITEM-1", "Лаваш", 5)];
        let keyboard = cart_keyboard(&items);

        assert_eq!(
            button_payloads(&keyboard),
            vec!["ITEM-1", "customer_info", "main_menu"]
        );

        let remove_label = &keyboard.inline_keyboard[0][0].text;
        assert_eq!(remove_label, "Убрать Лаваш");
    }

    #[test]
    fn description_text_matches_card_layout() {
        let text = format_description(&product("PROD-1", "Лаваш"));

        assert_eq!(
            text,
            "Лаваш\n\n150 руб. за штуку\n\n24 штук в наличии\n\nТонкий и мягкий"
        );
    }

    #[test]
    fn cart_text_lists_items_and_total() {
        let cart = Cart {
            meta: CartMeta {
                display_price: DisplayPrice {
                    with_tax: FormattedPrice {
                        formatted: "750 руб.".to_string(),
                    },
                },
            },
        };
        let items = vec![cart_item("ITEM-1", "Лаваш", 5)];

        assert_eq!(
            format_cart(&cart, &items),
            "Лаваш\nТонкий и мягкий\n150 руб. за штуку\n5 шт. в корзине за 750 руб.\n\nВсего: 750 руб."
        );
    }

    #[test]
    fn empty_cart_text_is_just_the_total() {
        let cart = Cart {
            meta: CartMeta {
                display_price: DisplayPrice {
                    with_tax: FormattedPrice {
                        formatted: "0 руб.".to_string(),
                    },
                },
            },
        };

        assert_eq!(format_cart(&cart, &[]), "Всего: 0 руб.");
    }
}
