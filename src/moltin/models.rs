use serde::Deserialize;

/// Обёртка ответа Moltin: полезная часть всегда лежит под ключом data
#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub meta: ProductMeta,
    pub relationships: ProductRelationships,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductMeta {
    pub display_price: DisplayPrice,
    pub stock: StockLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayPrice {
    pub with_tax: FormattedPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormattedPrice {
    pub formatted: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockLevel {
    pub level: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRelationships {
    pub main_image: ImageRelationship,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRelationship {
    pub data: ResourceRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

/// Корзина целиком: из неё нужен только итог с налогом
#[derive(Debug, Clone, Deserialize)]
pub struct Cart {
    pub meta: CartMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartMeta {
    pub display_price: DisplayPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub meta: CartItemMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemMeta {
    pub display_price: CartItemDisplayPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemDisplayPrice {
    pub with_tax: CartItemPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemPrice {
    /// Цена за штуку
    pub unit: FormattedPrice,
    /// Цена позиции с учётом количества
    pub value: FormattedPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    pub link: FileLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileLink {
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_document_parses_nested_fields() {
        let body = json!({
            "data": {
                "id": "PROD-1",
                "type": "product",
                "name": "Lavash",
                "slug": "lavash",
                "sku": "LAV-001",
                "description": "Thin bread",
                "meta": {
                    "display_price": {
                        "with_tax": { "amount": 15000, "currency": "RUB", "formatted": "150 руб." }
                    },
                    "stock": { "level": 24, "availability": "in-stock" }
                },
                "relationships": {
                    "main_image": { "data": { "type": "main_image", "id": "FILE-1" } }
                }
            }
        });

        let document: Document<Product> = serde_json::from_value(body).unwrap();
        let product = document.data;

        assert_eq!(product.id, "PROD-1");
        assert_eq!(product.meta.display_price.with_tax.formatted, "150 руб.");
        assert_eq!(product.meta.stock.level, 24);
        assert_eq!(product.relationships.main_image.data.id, "FILE-1");
    }

    #[test]
    fn cart_item_document_parses_prices() {
        let body = json!({
            "data": [{
                "id": "ITEM-1",
                "type": "cart_item",
                "product_id": "PROD-1",
                "name": "Lavash",
                "description": "Thin bread",
                "quantity": 5,
                "meta": {
                    "display_price": {
                        "with_tax": {
                            "unit": { "amount": 15000, "formatted": "150 руб." },
                            "value": { "amount": 75000, "formatted": "750 руб." }
                        }
                    }
                }
            }]
        });

        let document: Document<Vec<CartItem>> = serde_json::from_value(body).unwrap();
        let item = &document.data[0];

        assert_eq!(item.quantity, 5);
        assert_eq!(item.meta.display_price.with_tax.unit.formatted, "150 руб.");
        assert_eq!(item.meta.display_price.with_tax.value.formatted, "750 руб.");
    }

    #[test]
    fn product_without_price_is_rejected() {
        let body = json!({
            "data": {
                "id": "PROD-1",
                "name": "Lavash",
                "description": "Thin bread",
                "meta": { "stock": { "level": 24 } },
                "relationships": {
                    "main_image": { "data": { "id": "FILE-1" } }
                }
            }
        });

        assert!(serde_json::from_value::<Document<Product>>(body).is_err());
    }
}
