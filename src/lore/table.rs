/// One known mailing list: its matching key and the archive URL prefix
/// that a bare message-id can be appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub address: String,
    pub url: String,
}

/// An ordered mailing-list table. Lookup order is the entry order: the
/// first entry whose address appears in the recipient string wins.
#[derive(Debug, Clone)]
pub struct ListTable {
    entries: Vec<ListEntry>,
    /// Fetched tables key lists by dotted domain form
    /// (`linux-kernel.vger.kernel.org`); the builtin table keys by plain
    /// `local@domain` addresses.
    dotted_keys: bool,
}

impl ListTable {
    /// Parse the `address: url` line format used by both the cache file
    /// and lore's lists.txt. Malformed lines are skipped with a warning.
    pub fn from_lines(text: &str) -> ListTable {
        let mut entries = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once(':') {
                Some((address, url)) if !address.trim().is_empty() && !url.trim().is_empty() => {
                    entries.push(ListEntry {
                        address: address.trim().to_string(),
                        url: url.trim().to_string(),
                    });
                }
                _ => log::warn!("skipping malformed list entry: {line:?}"),
            }
        }
        ListTable {
            entries,
            dotted_keys: true,
        }
    }

    /// Move the entry for `address` to the front of the lookup order, if
    /// present.
    pub fn promote(&mut self, address: &str) {
        if let Some(pos) = self.entries.iter().position(|e| e.address == address)
            && pos > 0
        {
            let entry = self.entries.remove(pos);
            self.entries.insert(0, entry);
        }
    }

    /// First entry whose address is a substring of `recipients`.
    pub fn lookup(&self, recipients: &str) -> Option<&ListEntry> {
        let haystack = if self.dotted_keys {
            recipients.replace('@', ".")
        } else {
            recipients.to_string()
        };
        self.entries
            .iter()
            .find(|entry| haystack.contains(&entry.address))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// The compiled-in table: lists known to be archived on lore, in
    /// preference order. No network, no failure modes.
    pub fn builtin() -> ListTable {
        let entries = [
            ("linux-kernel@vger.kernel.org", "https://lore.kernel.org/lkml/"),
            ("backports@vger.kernel.org", "https://lore.kernel.org/backports/"),
            ("cocci@systeme.lip6.fr", "https://lore.kernel.org/cocci/"),
            ("kernelnewbies@kernelnewbies.org", "https://lore.kernel.org/kernelnewbies/"),
            ("linux-arm-kernel@lists.infradead.org", "https://lore.kernel.org/linux-arm-kernel/"),
            ("linux-block@vger.kernel.org", "https://lore.kernel.org/linux-block/"),
            ("linux-bluetooth@vger.kernel.org", "https://lore.kernel.org/linux-bluetooth/"),
            ("linux-btrfs@vger.kernel.org", "https://lore.kernel.org/linux-btrfs/"),
            ("linux-clk@vger.kernel.org", "https://lore.kernel.org/linux-clk/"),
            ("linux-integrity@vger.kernel.org", "https://lore.kernel.org/linux-integrity/"),
            ("linux-nfs@vger.kernel.org", "https://lore.kernel.org/linux-nfs/"),
            ("linux-parisc@vger.kernel.org", "https://lore.kernel.org/linux-parisc/"),
            ("linux-pci@vger.kernel.org", "https://lore.kernel.org/linux-pci/"),
            ("linux-riscv@lists.infradead.org", "https://lore.kernel.org/linux-riscv/"),
            ("linux-rtc@vger.kernel.org", "https://lore.kernel.org/linux-rtc/"),
            ("linux-security-module@vger.kernel.org", "https://lore.kernel.org/linux-security-module/"),
            ("linux-sgx@vger.kernel.org", "https://lore.kernel.org/linux-sgx/"),
            ("linux-wireless@vger.kernel.org", "https://lore.kernel.org/linux-wireless/"),
            ("linuxppc-dev@lists.ozlabs.org", "https://lore.kernel.org/linuxppc-dev/"),
            ("selinux@vger.kernel.org", "https://lore.kernel.org/selinux/"),
            ("selinux-refpolicy@vger.kernel.org", "https://lore.kernel.org/selinux-refpolicy/"),
            ("util-linux@vger.kernel.org", "https://lore.kernel.org/util-linux/"),
            ("wireguard@lists.zx2c4.com", "https://lore.kernel.org/wireguard/"),
        ];
        ListTable {
            entries: entries
                .into_iter()
                .map(|(address, url)| ListEntry {
                    address: address.to_string(),
                    url: url.to_string(),
                })
                .collect(),
            dotted_keys: false,
        }
    }
}
